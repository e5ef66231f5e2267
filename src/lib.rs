pub mod builtin;
pub mod conflict;
pub mod error;
pub mod generator;
pub mod keyboard;
pub mod layout;
pub mod model;
pub mod ops;
pub mod sentence;
pub mod stats;
pub mod trace;
pub mod transform;
pub mod weights;

pub use error::{Result, TypoError};
pub use generator::{generate_typos, GeneratorConfig, TypoGenerator, DEFAULT_MAX_TRIES};
pub use layout::{KeyboardLayout, LayoutRegistry};
pub use model::{TypoDistribution, TypoKind};
