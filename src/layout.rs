use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypoError};

/// Marks an empty cell inside a row string.
pub const EMPTY_CELL: char = ' ';

/// A grid of single-character keys. Rows may differ in length and may contain
/// empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGrid {
    rows: Vec<Vec<Option<char>>>,
}

impl KeyGrid {
    /// Build a grid from row strings, one key per `char`. A space marks an empty cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let rows: Vec<Vec<Option<char>>> = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| if c == EMPTY_CELL { None } else { Some(c) })
                    .collect()
            })
            .collect();

        if rows.iter().all(|row| row.iter().all(Option::is_none)) {
            return Err(TypoError::InvalidLayout(
                "keyboard grid must contain at least one key".to_string(),
            ));
        }

        Ok(Self { rows })
    }

    /// Build without the non-empty check; for built-in literal rows.
    pub(crate) fn from_rows_unchecked(rows: &[&str]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| {
                    row.chars()
                        .map(|c| if c == EMPTY_CELL { None } else { Some(c) })
                        .collect()
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map(Vec::len).unwrap_or(0)
    }

    /// Key at `(row, col)`; `None` for empty or out-of-bounds cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Every `(row, col)` holding `key`, in row-major order.
    pub fn positions(&self, key: char) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, cell)| **cell == Some(key))
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn contains(&self, key: char) -> bool {
        self.positions(key).next().is_some()
    }
}

/// Grid reached through a modifier key (e.g. AltGr), with the table mapping each
/// modified character to the base key it shares a position with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltGrid {
    pub grid: KeyGrid,
    pub base: HashMap<char, char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

/// Left/right hand partition of a layout's keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandSplit {
    pub left: HashSet<char>,
    pub right: HashSet<char>,
}

impl HandSplit {
    pub fn new(left: impl IntoIterator<Item = char>, right: impl IntoIterator<Item = char>) -> Self {
        Self {
            left: left.into_iter().collect(),
            right: right.into_iter().collect(),
        }
    }

    pub fn hand_of(&self, c: char) -> Option<Hand> {
        if self.left.contains(&c) {
            Some(Hand::Left)
        } else if self.right.contains(&c) {
            Some(Hand::Right)
        } else {
            None
        }
    }
}

/// Physical keyboard data for one language. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardLayout {
    grid: KeyGrid,
    alt: Option<AltGrid>,
    hands: HandSplit,
    ignore: BTreeSet<String>,
}

impl KeyboardLayout {
    pub fn new(grid: KeyGrid) -> Self {
        Self {
            grid,
            alt: None,
            hands: HandSplit::default(),
            ignore: BTreeSet::new(),
        }
    }

    pub fn with_alt_grid(mut self, alt: AltGrid) -> Self {
        self.alt = Some(alt);
        self
    }

    pub fn with_hands(mut self, hands: HandSplit) -> Self {
        self.hands = hands;
        self
    }

    pub fn with_ignore_set<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = tokens.into_iter().map(|t| t.into().to_lowercase()).collect();
        self
    }

    pub fn grid(&self) -> &KeyGrid {
        &self.grid
    }

    pub fn alt_grid(&self) -> Option<&AltGrid> {
        self.alt.as_ref()
    }

    pub fn hands(&self) -> &HandSplit {
        &self.hands
    }

    pub fn ignore_set(&self) -> &BTreeSet<String> {
        &self.ignore
    }

    pub fn hand_of(&self, c: char) -> Option<Hand> {
        self.hands.hand_of(c)
    }

    /// Grid to search for `c`: the alternate grid when `c` is one of its
    /// modified characters, the primary grid otherwise.
    pub fn grid_for(&self, c: char) -> &KeyGrid {
        match &self.alt {
            Some(alt) if alt.base.contains_key(&c) => &alt.grid,
            _ => &self.grid,
        }
    }

    /// True when the lowercased word contains any ignore-set token as a substring.
    pub fn is_ignored(&self, word: &str) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let lower = word.to_lowercase();
        self.ignore.iter().any(|token| lower.contains(token.as_str()))
    }
}

/// Per-language layout store.
///
/// Language names map to layout codes; codes map to layouts. Registration takes
/// `&mut self`, so once a registry is shared (e.g. behind an `Arc`) it is read-only.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    languages: BTreeMap<String, String>,
    layouts: HashMap<String, Arc<KeyboardLayout>>,
}

impl LayoutRegistry {
    /// Registry preloaded with the built-in layouts.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for (language, code, layout) in crate::builtin::layouts() {
            registry.insert(language, code, layout);
        }
        registry
    }

    /// Register or override a layout from its grid.
    ///
    /// When `hands` or `ignore` is `None`, a layout already stored under `code`
    /// keeps its hand split or ignore set; otherwise they start empty. Any
    /// alternate grid previously stored under `code` is dropped.
    pub fn register(
        &mut self,
        language: &str,
        code: &str,
        grid: KeyGrid,
        hands: Option<HandSplit>,
        ignore: Option<Vec<String>>,
    ) -> Result<()> {
        self.check_language(language, code)?;

        let previous = self.layouts.get(code);
        let hands = hands
            .or_else(|| previous.map(|l| l.hands.clone()))
            .unwrap_or_default();
        let ignore: BTreeSet<String> = match ignore {
            Some(tokens) => tokens.into_iter().map(|t| t.to_lowercase()).collect(),
            None => previous.map(|l| l.ignore.clone()).unwrap_or_default(),
        };

        let layout = KeyboardLayout {
            grid,
            alt: None,
            hands,
            ignore,
        };
        self.insert(language, code, layout);
        Ok(())
    }

    /// Register or override a fully specified layout.
    pub fn register_layout(
        &mut self,
        language: &str,
        code: &str,
        layout: KeyboardLayout,
    ) -> Result<()> {
        self.check_language(language, code)?;
        self.insert(language, code, layout);
        Ok(())
    }

    pub fn lookup(&self, language: &str) -> Result<Arc<KeyboardLayout>> {
        self.languages
            .get(language)
            .and_then(|code| self.layouts.get(code))
            .cloned()
            .ok_or_else(|| TypoError::UnknownLanguage {
                language: language.to_string(),
                available: self.languages.keys().cloned().collect(),
            })
    }

    pub fn code_of(&self, language: &str) -> Option<&str> {
        self.languages.get(language).map(String::as_str)
    }

    /// `(language, code)` pairs in language-name order.
    pub fn supported_languages(&self) -> Vec<(String, String)> {
        self.languages
            .iter()
            .map(|(name, code)| (name.clone(), code.clone()))
            .collect()
    }

    fn check_language(&self, language: &str, code: &str) -> Result<()> {
        match self.languages.get(language) {
            Some(existing) if existing != code => Err(TypoError::DuplicateLanguage {
                language: language.to_string(),
                existing: existing.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn insert(&mut self, language: &str, code: &str, layout: KeyboardLayout) {
        self.languages
            .insert(language.to_string(), code.to_string());
        self.layouts.insert(code.to_string(), Arc::new(layout));
    }
}

/// On-disk (JSON) description of a custom layout.
///
/// ```json
/// {
///   "language": "english-custom",
///   "code": "en-custom",
///   "rows": ["qwertyuiop", "asdfghjkl", "zxcvbnm"],
///   "left": "qwertasdfgzxcvb",
///   "right": "yuiophjklnm",
///   "ignore": ["one", "two", "1", "2"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub language: String,
    pub code: String,
    pub rows: Vec<String>,
    #[serde(default)]
    pub alt_rows: Option<Vec<String>>,
    #[serde(default)]
    pub alt_base: BTreeMap<char, char>,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
}

impl LayoutFile {
    pub fn register_into(self, registry: &mut LayoutRegistry) -> Result<()> {
        let grid = KeyGrid::from_rows(&self.rows)?;

        let hands = match (self.left, self.right) {
            (Some(left), Some(right)) => Some(HandSplit::new(left.chars(), right.chars())),
            (None, None) => None,
            _ => {
                return Err(TypoError::InvalidLayout(format!(
                    "layout '{}' must give both left and right keys, or neither",
                    self.language
                )))
            }
        };

        let Some(alt_rows) = self.alt_rows else {
            if !self.alt_base.is_empty() {
                return Err(TypoError::InvalidLayout(format!(
                    "layout '{}' has alt_base but no alt_rows",
                    self.language
                )));
            }
            return registry.register(&self.language, &self.code, grid, hands, self.ignore);
        };

        let alt = AltGrid {
            grid: KeyGrid::from_rows(&alt_rows)?,
            base: self.alt_base.into_iter().collect(),
        };
        let layout = KeyboardLayout::new(grid)
            .with_alt_grid(alt)
            .with_hands(hands.unwrap_or_default())
            .with_ignore_set(self.ignore.unwrap_or_default());
        registry.register_layout(&self.language, &self.code, layout)
    }
}
