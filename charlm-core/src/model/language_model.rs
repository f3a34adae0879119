use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io::BufRead;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::frequency_table::FrequencyTable;
use crate::config::ModelConfig;
use crate::error::{CharLmError, Result};
use crate::io::CorpusChars;

/// Fixed-order character-level Markov model.
///
/// The model maps every context (a window of `window_length` characters)
/// seen in the corpus to the distribution of the character that followed it.
///
/// # Responsibilities
/// - Train the context tables with one sliding-window pass over a corpus
/// - Generate text by repeatedly sampling the table of the current context
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key of `table` is exactly `window_length` characters long
/// - Every table holds at least one observation
/// - After training returns, every table is finalized
#[derive(Clone, Debug)]
pub struct LanguageModel {
	window_length: usize,
	table: HashMap<String, FrequencyTable>,
	rng: StdRng,
}

impl LanguageModel {
	/// Creates a model whose random source is seeded from OS entropy.
	///
	/// Generating several times produces different texts.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self> {
		Self::from_config(&ModelConfig { window_length, seed: None })
	}

	/// Creates a model with a fixed seed.
	///
	/// Two models with the same seed, trained on the same corpus, generate
	/// the same texts for the same calls.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self> {
		Self::from_config(&ModelConfig { window_length, seed: Some(seed) })
	}

	/// Creates a model from a validated configuration.
	pub fn from_config(config: &ModelConfig) -> Result<Self> {
		config.validate()?;

		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		debug!(
			"new language model: window_length={}, seed={:?}",
			config.window_length, config.seed
		);

		Ok(Self {
			window_length: config.window_length,
			table: HashMap::new(),
			rng,
		})
	}

	/// Number of characters in a context.
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct contexts learned.
	pub fn context_count(&self) -> usize {
		self.table.len()
	}

	/// Whether `context` was followed by at least one character in training.
	pub fn contains_context(&self, context: &str) -> bool {
		self.table.contains_key(context)
	}

	/// Returns the distribution learned for `context`, if any.
	pub fn table(&self, context: &str) -> Option<&FrequencyTable> {
		self.table.get(context)
	}

	/// Iterates over every `(context, table)` pair, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = (&str, &FrequencyTable)> {
		self.table.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Trains the model on a sequence of characters, consumed once.
	///
	/// The first `window_length` characters form the initial context. Each
	/// following character is counted in the table of the current context,
	/// then the window slides by one. Probabilities are computed once the
	/// sequence is exhausted.
	///
	/// # Notes
	/// - A sequence shorter than or equal to the window trains nothing.
	/// - Calling it again accumulates into the existing tables; each call
	///   starts a fresh window.
	pub fn train<I>(&mut self, chars: I) -> Result<()>
	where
		I: IntoIterator<Item = char>,
	{
		self.try_train(chars.into_iter().map(Ok))
	}

	/// Trains the model on UTF-8 text pulled from `reader`.
	///
	/// Same algorithm as [`train`](Self::train), without loading the whole
	/// corpus in memory.
	///
	/// # Errors
	/// Returns [`CharLmError::Io`] if reading or decoding fails. The tables
	/// are then left unfinalized and the model should be discarded.
	pub fn train_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
		self.try_train(CorpusChars::new(reader).map(|c| c.map_err(CharLmError::from)))
	}

	fn try_train<I>(&mut self, chars: I) -> Result<()>
	where
		I: Iterator<Item = Result<char>>,
	{
		let mut window: VecDeque<char> = VecDeque::new();
		let mut key = String::new();
		let mut read: usize = 0;

		for c in chars {
			let c = c?;
			read += 1;

			// Initial context
			if window.len() < self.window_length {
				window.push_back(c);
				continue;
			}

			key.clear();
			key.extend(window.iter());
			match self.table.get_mut(key.as_str()) {
				Some(table) => table.update(c),
				None => {
					let mut table = FrequencyTable::new();
					table.update(c);
					self.table.insert(key.clone(), table);
				}
			}

			window.pop_front();
			window.push_back(c);
		}

		if read <= self.window_length {
			warn!(
				"corpus of {} characters is not longer than the window ({}), nothing learned",
				read, self.window_length
			);
		}

		for table in self.table.values_mut() {
			table.finalize_probabilities()?;
		}

		info!("trained on {} characters, {} contexts", read, self.table.len());
		Ok(())
	}

	/// Generates text following `seed_text`.
	///
	/// Appends up to `target_length` characters, each drawn from the table
	/// of the last `window_length` characters of the text so far.
	///
	/// # Behavior
	/// - If `seed_text` is shorter than the window, it is returned unchanged.
	/// - If the current context was never seen during training, generation
	///   stops and the partial text is returned.
	///
	/// # Notes
	/// - Lengths are counted in characters, not bytes.
	/// - Takes `&mut self` because every draw advances the random source.
	pub fn generate(&mut self, seed_text: &str, target_length: usize) -> String {
		let seed_len = seed_text.chars().count();
		if seed_len < self.window_length {
			return seed_text.to_owned();
		}

		let mut result = seed_text.to_owned();
		let mut context: VecDeque<char> = seed_text
			.chars()
			.skip(seed_len - self.window_length)
			.collect();
		let mut key = String::new();

		for generated in 0..target_length {
			key.clear();
			key.extend(context.iter());

			let Some(table) = self.table.get(key.as_str()) else {
				debug!("unknown context {:?} after {} characters, stopping", key, generated);
				break;
			};

			let r: f64 = self.rng.random();
			// Tables are never empty once trained
			let Some(next_char) = table.sample(r) else {
				break;
			};

			result.push(next_char);
			context.pop_front();
			context.push_back(next_char);
		}

		result
	}
}

impl fmt::Display for LanguageModel {
	/// One `context : table` line per context, sorted by context.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<&String> = self.table.keys().collect();
		keys.sort();
		for key in keys {
			writeln!(f, "{} : {}", key, self.table[key])?;
		}
		Ok(())
	}
}
