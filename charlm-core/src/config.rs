//! Construction parameters of a [`LanguageModel`](crate::model::language_model::LanguageModel).

use serde::{Deserialize, Serialize};

use crate::error::{CharLmError, Result};

/// Window length used when none is given.
pub const DEFAULT_WINDOW_LENGTH: usize = 7;

/// Parameters fixed for the lifetime of a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
	/// Number of characters forming a context.
	pub window_length: usize,
	/// Seed of the random source. `None` seeds from OS entropy.
	pub seed: Option<u64>,
}

impl ModelConfig {
	/// Returns a builder initialised with [`ModelConfig::default`].
	#[must_use]
	pub fn builder() -> ModelConfigBuilder {
		ModelConfigBuilder::default()
	}

	/// Checks the invariants required to build a model.
	pub fn validate(&self) -> Result<()> {
		if self.window_length == 0 {
			return Err(CharLmError::InvalidConfig(
				"window_length must be greater than zero".into(),
			));
		}
		Ok(())
	}
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			window_length: DEFAULT_WINDOW_LENGTH,
			seed: None,
		}
	}
}

/// Builder for [`ModelConfig`].
#[derive(Debug, Default, Clone)]
pub struct ModelConfigBuilder {
	cfg: ModelConfig,
}

impl ModelConfigBuilder {
	/// Number of characters forming a context.
	#[must_use]
	pub fn window_length(mut self, window_length: usize) -> Self {
		self.cfg.window_length = window_length;
		self
	}

	/// Makes generation reproducible.
	#[must_use]
	pub fn seed(mut self, seed: u64) -> Self {
		self.cfg.seed = Some(seed);
		self
	}

	/// Validates and returns the configuration.
	pub fn build(self) -> Result<ModelConfig> {
		self.cfg.validate()?;
		Ok(self.cfg)
	}
}
