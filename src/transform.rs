//! Text-corruption strategies behind one `apply` method.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Result, TypoError};
use crate::generator::{GeneratorConfig, TypoGenerator, DEFAULT_MAX_TRIES};
use crate::layout::LayoutRegistry;

pub trait ErrorGenerator {
    /// Return `text` with this generator's errors applied.
    fn apply(&mut self, text: &str) -> String;
}

/// Leaves text untouched; the control condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGenerator;

impl ErrorGenerator for IdentityGenerator {
    fn apply(&mut self, text: &str) -> String {
        text.to_string()
    }
}

/// Keyboard-proximity typos at a fixed rate, with its own RNG.
#[derive(Debug, Clone)]
pub struct TypoErrorGenerator {
    generator: TypoGenerator,
    typo_rate: f64,
    rng: StdRng,
}

impl TypoErrorGenerator {
    pub const DEFAULT_TYPO_RATE: f64 = 0.3;

    pub fn new(
        registry: &LayoutRegistry,
        language: &str,
        typo_rate: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !(typo_rate.is_finite() && (0.0..=1.0).contains(&typo_rate)) {
            return Err(TypoError::InvalidTypoRate(typo_rate));
        }

        let cfg = GeneratorConfig {
            language: language.to_string(),
            ..Default::default()
        };
        let generator = TypoGenerator::new(registry, cfg)?;

        Ok(Self {
            generator,
            typo_rate,
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
        })
    }

    /// Polish layout at the default rate.
    pub fn polish(seed: Option<u64>) -> Result<Self> {
        Self::new(
            &LayoutRegistry::builtin(),
            "polish",
            Self::DEFAULT_TYPO_RATE,
            seed,
        )
    }

    pub fn typo_rate(&self) -> f64 {
        self.typo_rate
    }
}

impl ErrorGenerator for TypoErrorGenerator {
    fn apply(&mut self, text: &str) -> String {
        // The rate was validated at construction, the only error `insert_typos` raises.
        self.generator
            .insert_typos(text, self.typo_rate, DEFAULT_MAX_TRIES, &mut self.rng)
            .unwrap_or_else(|_| text.to_string())
    }
}
