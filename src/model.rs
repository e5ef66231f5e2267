use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypoKind {
    Delete,
    Insert,
    Replace,
    Transpose,
}

impl TypoKind {
    pub const ALL: [TypoKind; 4] = [
        TypoKind::Delete,
        TypoKind::Insert,
        TypoKind::Replace,
        TypoKind::Transpose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypoKind::Delete => "delete",
            TypoKind::Insert => "insert",
            TypoKind::Replace => "replace",
            TypoKind::Transpose => "transpose",
        }
    }
}

impl fmt::Display for TypoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypoKind {
    type Err = TypoError;

    fn from_str(s: &str) -> Result<Self> {
        TypoKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TypoError::UnknownTypoKind(s.to_string()))
    }
}

/// Normalised mixture of edit kinds. Kinds not listed have weight 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<TypoKind, f64>", into = "BTreeMap<TypoKind, f64>")]
pub struct TypoDistribution {
    weights: BTreeMap<TypoKind, f64>,
}

impl Default for TypoDistribution {
    fn default() -> Self {
        let raw = [
            (TypoKind::Delete, 0.28),
            (TypoKind::Insert, 0.15),
            (TypoKind::Replace, 0.28),
            (TypoKind::Transpose, 0.28),
        ];
        let total: f64 = raw.iter().map(|(_, w)| w).sum();
        Self {
            weights: raw.into_iter().map(|(k, w)| (k, w / total)).collect(),
        }
    }
}

impl TypoDistribution {
    /// Build from `(kind, weight)` pairs; repeated kinds accumulate.
    pub fn new(weights: impl IntoIterator<Item = (TypoKind, f64)>) -> Result<Self> {
        let mut raw: BTreeMap<TypoKind, f64> = BTreeMap::new();
        for (kind, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TypoError::InvalidDistribution(format!(
                    "weight for {kind} must be finite and >= 0, got {weight}"
                )));
            }
            *raw.entry(kind).or_insert(0.0) += weight;
        }

        let total: f64 = raw.values().sum();
        if total <= 0.0 {
            return Err(TypoError::InvalidDistribution(
                "typo distribution must have positive total mass".to_string(),
            ));
        }

        for weight in raw.values_mut() {
            *weight /= total;
        }
        Ok(Self { weights: raw })
    }

    /// Every edit is of `kind`.
    pub fn only(kind: TypoKind) -> Self {
        Self {
            weights: BTreeMap::from([(kind, 1.0)]),
        }
    }

    /// Parse `kind=weight` pairs, e.g. `delete=0.3`.
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut parsed = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let pair = pair.as_ref();
            let (kind, weight) = pair.split_once('=').ok_or_else(|| {
                TypoError::InvalidDistribution(format!("expected kind=weight, got '{pair}'"))
            })?;
            let weight: f64 = weight.trim().parse().map_err(|_| {
                TypoError::InvalidDistribution(format!("invalid weight in '{pair}'"))
            })?;
            parsed.push((kind.parse::<TypoKind>()?, weight));
        }
        Self::new(parsed)
    }

    pub fn weight(&self, kind: TypoKind) -> f64 {
        self.weights.get(&kind).copied().unwrap_or(0.0)
    }

    /// Weighted sampler over the listed kinds, built once per corruption run.
    pub fn sampler(&self) -> Result<KindSampler> {
        let index = WeightedIndex::new(self.weights.values().copied())
            .map_err(|e| TypoError::InvalidDistribution(e.to_string()))?;
        Ok(KindSampler {
            kinds: self.weights.keys().copied().collect(),
            index,
        })
    }
}

#[derive(Debug, Clone)]
pub struct KindSampler {
    kinds: Vec<TypoKind>,
    index: WeightedIndex<f64>,
}

impl KindSampler {
    pub fn sample(&self, rng: &mut impl Rng) -> TypoKind {
        self.kinds[self.index.sample(rng)]
    }
}

impl TryFrom<BTreeMap<TypoKind, f64>> for TypoDistribution {
    type Error = TypoError;

    fn try_from(value: BTreeMap<TypoKind, f64>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TypoDistribution> for BTreeMap<TypoKind, f64> {
    fn from(value: TypoDistribution) -> Self {
        value.weights
    }
}

/// Result of one edit attempt: the new word and the indices it touched.
///
/// `indices` is `None` only for a transpose that found no eligible pair, in which
/// case `word` is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub word: String,
    pub indices: Option<Vec<usize>>,
}

impl EditResult {
    pub fn unchanged(word: &str, indices: Option<Vec<usize>>) -> Self {
        Self {
            word: word.to_string(),
            indices,
        }
    }
}

/// An accepted edit in a word's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub kind: TypoKind,
    /// Indices into the word as it stood when the edit was applied.
    pub indices: Vec<usize>,
    /// The word right after the edit.
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordState {
    pub original: String,
    pub current: String,
    pub history: Vec<Edit>,
}

impl WordState {
    pub fn new(word: &str) -> Self {
        Self {
            original: word.to_string(),
            current: word.to_string(),
            history: Vec::new(),
        }
    }

    pub fn is_corrupted(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Outcome of corrupting one piece of text.
///
/// `typoed` may fall short of `target` when the retry budget ran out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corruption {
    pub text: String,
    pub target: usize,
    pub typoed: usize,
    pub tries: usize,
    pub words: Vec<WordState>,
}

impl Corruption {
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            target: 0,
            typoed: 0,
            tries: 0,
            words: Vec::new(),
        }
    }

    pub fn is_short(&self) -> bool {
        self.typoed < self.target
    }
}

/// Outcome of corrupting a multi-sentence text, one report per sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCorruption {
    pub text: String,
    pub sentences: Vec<Corruption>,
}

impl TextCorruption {
    pub fn typoed(&self) -> usize {
        self.sentences.iter().map(|s| s.typoed).sum()
    }

    pub fn target(&self) -> usize {
        self.sentences.iter().map(|s| s.target).sum()
    }
}
