//! Character-level Markov model.
//!
//! - Per-context character distributions (`FrequencyTable`)
//! - The sliding-window model that trains them and generates text (`LanguageModel`)

/// Fixed-order character model: training over a corpus and text generation.
pub mod language_model;

/// Occurrence counts of the characters following one context, and sampling
/// from the resulting distribution.
pub mod frequency_table;
