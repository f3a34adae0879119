//! Error type shared by the frequency tables, the language model and the corpus readers.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = CharLmError> = std::result::Result<T, E>;

/// Failures surfaced by the character language model.
///
/// Running out of known contexts during generation and a seed text shorter
/// than the window are *not* errors: both end generation normally.
#[derive(Debug, Error)]
pub enum CharLmError {
	/// The model configuration failed validation.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// A frequency table entry was requested outside `[0, len)`.
	#[error("index {index} out of range for a table of {len} observations")]
	IndexOutOfRange {
		index: usize,
		len: usize,
	},

	/// Probabilities were requested on a table with no observations.
	#[error("cannot compute probabilities of an empty frequency table")]
	EmptyTable,

	/// Reading or decoding the corpus failed.
	#[error("io error while reading {path:?}: {source}")]
	Io {
		source: std::io::Error,
		path: Option<PathBuf>,
	},
}

impl CharLmError {
	/// Wraps an IO error, attaching the corpus path when it is known.
	pub fn io(source: std::io::Error, path: Option<PathBuf>) -> Self {
		Self::Io { source, path }
	}
}

impl From<std::io::Error> for CharLmError {
	fn from(source: std::io::Error) -> Self {
		Self::io(source, None)
	}
}
