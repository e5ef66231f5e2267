use thiserror::Error;

/// Errors raised while configuring layouts and generators.
///
/// Missing keyboard data for a character is not an error: the affected edit
/// attempt simply produces no change.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypoError {
    #[error("language '{language}' is already registered with code '{existing}'; choose a different language name for custom layouts")]
    DuplicateLanguage { language: String, existing: String },

    #[error("unsupported language: {language}. Available: {}", available.join(", "))]
    UnknownLanguage {
        language: String,
        available: Vec<String>,
    },

    #[error("invalid typo distribution: {0}")]
    InvalidDistribution(String),

    #[error("typo_rate must be between 0.0 and 1.0, got {0}")]
    InvalidTypoRate(f64),

    #[error("invalid neighbor ratio: {0}")]
    InvalidNeighborRatio(String),

    #[error("invalid keyboard layout: {0}")]
    InvalidLayout(String),

    #[error("unknown typo kind '{0}'; expected one of delete, insert, replace, transpose")]
    UnknownTypoKind(String),
}

pub type Result<T> = std::result::Result<T, TypoError>;
