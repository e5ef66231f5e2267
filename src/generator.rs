use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, trace};
use rand::Rng;

use crate::conflict::is_valid_edit;
use crate::error::{Result, TypoError};
use crate::keyboard::{NeighborRatio, NeighborResolver};
use crate::layout::{KeyboardLayout, LayoutRegistry};
use crate::model::{
    Corruption, Edit, EditResult, TextCorruption, TypoDistribution, TypoKind, WordState,
};
use crate::sentence::{SentenceTokenizer, UnicodeSentenceTokenizer};
use crate::weights::{normalize_rounded, pick_weighted, round_half_up};

pub const DEFAULT_MAX_TRIES: usize = 1000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub language: String,
    pub use_excluding_set: bool,
    pub distribution: TypoDistribution,
    pub neighbor_ratio: NeighborRatio,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            use_excluding_set: true,
            distribution: TypoDistribution::default(),
            neighbor_ratio: NeighborRatio::default(),
        }
    }
}

fn validate_typo_rate(typo_rate: f64) -> Result<()> {
    if typo_rate.is_finite() && (0.0..=1.0).contains(&typo_rate) {
        Ok(())
    } else {
        Err(TypoError::InvalidTypoRate(typo_rate))
    }
}

/// Typo injector bound to one language layout and configuration.
///
/// Holds no per-call state; randomness comes from the caller's RNG, so one
/// generator can be shared while each worker brings its own seeded RNG.
#[derive(Debug, Clone)]
pub struct TypoGenerator {
    language: String,
    layout: Arc<KeyboardLayout>,
    use_excluding_set: bool,
    distribution: TypoDistribution,
    neighbor_ratio: NeighborRatio,
}

/// Retry-loop states. One try counter is shared by word and operation selection.
enum Phase {
    SelectingWord,
    SelectingOperation { word_idx: usize, word: String },
    Validating {
        word_idx: usize,
        word: String,
        kind: TypoKind,
        result: EditResult,
    },
    Accepted {
        word_idx: usize,
        edit: Edit,
    },
    TriesExhausted,
}

impl TypoGenerator {
    pub fn new(registry: &LayoutRegistry, cfg: GeneratorConfig) -> Result<Self> {
        cfg.neighbor_ratio.validate()?;
        let layout = registry.lookup(&cfg.language)?;

        Ok(Self {
            language: cfg.language,
            layout,
            use_excluding_set: cfg.use_excluding_set,
            distribution: cfg.distribution,
            neighbor_ratio: cfg.neighbor_ratio,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn distribution(&self) -> &TypoDistribution {
        &self.distribution
    }

    fn is_eligible(&self, word: &str) -> bool {
        if word.chars().count() <= 1 {
            return false;
        }
        !(self.use_excluding_set && self.layout.is_ignored(word))
    }

    /// Corrupt roughly `typo_rate` of the space-separated words in `text`.
    ///
    /// Returns the best effort once `max_tries` is spent; compare `typoed`
    /// with `target` to detect a shortfall.
    pub fn corrupt(
        &self,
        text: &str,
        typo_rate: f64,
        max_tries: usize,
        rng: &mut impl Rng,
    ) -> Result<Corruption> {
        validate_typo_rate(typo_rate)?;

        let mut words: Vec<WordState> = text.split(' ').map(WordState::new).collect();
        let target = round_half_up(typo_rate * words.len() as f64, 0);
        if target < 0.5 {
            return Ok(Corruption::unchanged(text));
        }
        let target = target as usize;

        let raw: Vec<f64> = words
            .iter()
            .map(|w| (w.current.chars().count() as f64).sqrt())
            .collect();
        if raw.iter().sum::<f64>() == 0.0 {
            return Ok(Corruption::unchanged(text));
        }
        let mut weights = normalize_rounded(&raw);
        if weights.iter().all(|w| *w == 0.0) {
            // Long texts can round every share down to zero.
            let total: f64 = raw.iter().sum();
            weights = raw.iter().map(|w| w / total).collect();
        }

        let kinds = self.distribution.sampler()?;
        let keys = NeighborResolver::new(&self.layout, self.neighbor_ratio);
        let last_idx = words.len() - 1;
        let mut typoed = 0usize;
        let mut tries = 0usize;
        let mut phase = Phase::SelectingWord;

        while typoed < target {
            phase = match phase {
                Phase::SelectingWord => {
                    if tries > max_tries {
                        Phase::TriesExhausted
                    } else {
                        tries += 1;
                        let word_idx = pick_weighted(&weights, rng)
                            .unwrap_or_else(|| rng.gen_range(0..words.len()));
                        let word = &words[word_idx].current;
                        if self.is_eligible(word) {
                            Phase::SelectingOperation {
                                word_idx,
                                word: word.clone(),
                            }
                        } else {
                            Phase::SelectingWord
                        }
                    }
                }
                Phase::SelectingOperation { word_idx, mut word } => {
                    if tries > max_tries {
                        Phase::TriesExhausted
                    } else {
                        tries += 1;
                        let kind = kinds.sample(rng);
                        // Pad so the last letter can swap across the word boundary.
                        if kind == TypoKind::Transpose && word_idx != last_idx && !word.contains(' ')
                        {
                            word.push(' ');
                        }
                        let result = kind.apply(&word, &keys, rng);
                        Phase::Validating {
                            word_idx,
                            word,
                            kind,
                            result,
                        }
                    }
                }
                Phase::Validating {
                    word_idx,
                    word,
                    kind,
                    result,
                } => {
                    let state = &words[word_idx];
                    let changed = result.word != word
                        && result.word != state.current
                        && slot_text(&result.word) != slot_text(&state.original);
                    match result.indices {
                        Some(indices)
                            if changed && is_valid_edit(&state.history, kind, &indices) =>
                        {
                            Phase::Accepted {
                                word_idx,
                                edit: Edit {
                                    kind,
                                    indices,
                                    after: result.word,
                                },
                            }
                        }
                        indices => {
                            if changed {
                                trace!(
                                    "rejected {kind} at {indices:?} on {:?}: conflicts with earlier edits",
                                    state.current
                                );
                            }
                            Phase::SelectingOperation { word_idx, word }
                        }
                    }
                }
                // A change found on the very last try is discarded, like any other
                // work past the budget.
                Phase::Accepted { .. } if tries > max_tries => Phase::TriesExhausted,
                Phase::Accepted { word_idx, edit } => {
                    let state = &mut words[word_idx];
                    debug!(
                        "{} at {:?}: {:?} -> {:?}",
                        edit.kind, edit.indices, state.current, edit.after
                    );
                    weights[word_idx] *= 0.5;
                    state.current = edit.after.clone();
                    state.history.push(edit);
                    typoed += 1;
                    Phase::SelectingWord
                }
                Phase::TriesExhausted => {
                    debug!("retry budget of {max_tries} exhausted after {typoed}/{target} typos");
                    break;
                }
            };
        }

        Ok(Corruption {
            text: join_words(&words),
            target,
            typoed,
            tries,
            words,
        })
    }

    pub fn insert_typos(
        &self,
        text: &str,
        typo_rate: f64,
        max_tries: usize,
        rng: &mut impl Rng,
    ) -> Result<String> {
        Ok(self.corrupt(text, typo_rate, max_tries, rng)?.text)
    }

    /// Split `text` into sentences, corrupt each independently and join them
    /// with single spaces.
    pub fn corrupt_sentences(
        &self,
        text: &str,
        typo_rate: f64,
        max_tries: usize,
        tokenizer: &dyn SentenceTokenizer,
        rng: &mut impl Rng,
    ) -> Result<TextCorruption> {
        validate_typo_rate(typo_rate)?;

        let sentences = tokenizer.tokenize(text, &self.language);
        if sentences.is_empty() {
            return Ok(TextCorruption {
                text: text.to_string(),
                sentences: Vec::new(),
            });
        }

        let reports = sentences
            .iter()
            .map(|sentence| self.corrupt(sentence, typo_rate, max_tries, rng))
            .collect::<Result<Vec<_>>>()?;
        let joined = reports
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(TextCorruption {
            text: joined,
            sentences: reports,
        })
    }

    /// Corrupt multi-sentence text. Without a tokenizer the whole text is one sentence.
    pub fn insert_typos_in_text(
        &self,
        text: &str,
        typo_rate: f64,
        max_tries: usize,
        tokenizer: Option<&dyn SentenceTokenizer>,
        rng: &mut impl Rng,
    ) -> Result<String> {
        match tokenizer {
            Some(tokenizer) => Ok(self
                .corrupt_sentences(text, typo_rate, max_tries, tokenizer, rng)?
                .text),
            None => self.insert_typos(text, typo_rate, max_tries, rng),
        }
    }
}

/// Join word slots with single spaces. A slot that already holds a space (from a
/// transpose across the word boundary) is appended as-is.
fn join_words(words: &[WordState]) -> String {
    let mut out = String::new();
    for w in words {
        out.push_str(&w.current);
        if !w.current.contains(' ') {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

/// A word slot as `join_words` renders it, trailing separator included.
fn slot_text(word: &str) -> Cow<'_, str> {
    if word.contains(' ') {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("{word} "))
    }
}

/// One-shot helper: build a generator for `cfg` and corrupt `text` sentence by sentence.
pub fn generate_typos(
    registry: &LayoutRegistry,
    text: &str,
    cfg: GeneratorConfig,
    typo_rate: f64,
    rng: &mut impl Rng,
) -> Result<String> {
    let generator = TypoGenerator::new(registry, cfg)?;
    generator.insert_typos_in_text(
        text,
        typo_rate,
        DEFAULT_MAX_TRIES,
        Some(&UnicodeSentenceTokenizer),
        rng,
    )
}
