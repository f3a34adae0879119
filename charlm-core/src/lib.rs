//! Character-level Markov text generation library.
//!
//! This crate provides:
//! - Frequency tables turning character counts into a sampling distribution
//! - A fixed-order language model trained over a sliding window of a corpus
//! - Seedable generation for reproducible output
//! - Streaming corpus readers that never load the whole text
//!
//! ```
//! use charlm_core::LanguageModel;
//!
//! let mut model = LanguageModel::with_seed(3, 20)?;
//! model.train("abcabcabcabc".chars())?;
//! assert_eq!(model.generate("abc", 3), "abcabc");
//! # Ok::<(), charlm_core::CharLmError>(())
//! ```

/// Model construction parameters.
pub mod config;

/// Crate error type.
pub mod error;

/// Corpus readers (file opening, streaming character iteration).
pub mod io;

/// Frequency tables and the language model.
pub mod model;

pub use config::ModelConfig;
pub use error::{CharLmError, Result};
pub use model::frequency_table::{CharacterObservation, FrequencyTable};
pub use model::language_model::LanguageModel;
