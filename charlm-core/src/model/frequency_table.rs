use std::fmt;

use serde::Serialize;

use crate::error::{CharLmError, Result};

/// One distinct character observed after a given context.
///
/// `probability` and `cumulative_probability` are only meaningful once the
/// owning table has been finalized with
/// [`FrequencyTable::finalize_probabilities`].
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharacterObservation {
	character: char,
	count: u64,
	probability: f64,
	cumulative_probability: f64,
}

impl CharacterObservation {
	fn new(character: char) -> Self {
		Self {
			character,
			count: 1,
			probability: 0.0,
			cumulative_probability: 0.0,
		}
	}

	/// The observed character.
	pub fn character(&self) -> char {
		self.character
	}

	/// How many times the character followed the context.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// `count / total` for the owning table.
	pub fn probability(&self) -> f64 {
		self.probability
	}

	/// Running sum of probabilities up to and including this entry.
	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}
}

impl fmt::Display for CharacterObservation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({} {} {} {})",
			self.character, self.count, self.probability, self.cumulative_probability
		)
	}
}

/// Distribution of the characters that followed a single context.
///
/// This is a node of the Markov chain: every observation is an outgoing
/// edge weighted by the number of times it was seen during training.
///
/// ## Responsibilities:
/// - Accumulate character occurrences during training
/// - Turn the counts into probabilities and cumulative probabilities
/// - Pick a character from a uniform draw in `[0, 1)`
///
/// ## Invariants
/// - Characters are unique within a table
/// - Every stored count is strictly positive
/// - Iteration order is first-seen-first and never changes once an entry is
///   inserted, so a fixed draw always resolves to the same character
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
	observations: Vec<CharacterObservation>,
}

impl FrequencyTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `character`.
	///
	/// - If the character is already present, its count is increased.
	/// - Otherwise, a new observation with a count of 1 is appended.
	///
	/// Linear scan: the alphabet following one context is small.
	pub fn update(&mut self, character: char) {
		match self.observations.iter_mut().find(|o| o.character == character) {
			Some(observation) => observation.count += 1,
			None => self.observations.push(CharacterObservation::new(character)),
		}
	}

	/// Computes the probability and cumulative probability of every entry.
	///
	/// Must be called once all `update` calls are done, before sampling.
	/// The last cumulative probability is set to exactly `1.0`.
	///
	/// # Errors
	/// Returns [`CharLmError::EmptyTable`] if the table has no observations.
	pub fn finalize_probabilities(&mut self) -> Result<()> {
		let total = self.total_count();
		if total == 0 {
			return Err(CharLmError::EmptyTable);
		}

		let total = total as f64;
		let mut cumulative = 0.0;
		for observation in &mut self.observations {
			observation.probability = observation.count as f64 / total;
			cumulative += observation.probability;
			observation.cumulative_probability = cumulative;
		}

		if let Some(last) = self.observations.last_mut() {
			last.cumulative_probability = 1.0;
		}

		Ok(())
	}

	/// Picks a character given a uniform draw `r` in `[0, 1)`.
	///
	/// Returns the first character whose cumulative probability is greater
	/// than `r`. If rounding leaves no such entry, the last character is
	/// returned instead.
	///
	/// Returns `None` only if the table is empty.
	pub fn sample(&self, r: f64) -> Option<char> {
		self.observations
			.iter()
			.find(|o| r < o.cumulative_probability)
			.or_else(|| self.observations.last())
			.map(|o| o.character)
	}

	/// Position of `character` in iteration order.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.observations.iter().position(|o| o.character == character)
	}

	/// Returns the observation at `index`.
	///
	/// # Errors
	/// Returns [`CharLmError::IndexOutOfRange`] if `index >= len()`.
	pub fn get(&self, index: usize) -> Result<&CharacterObservation> {
		self.observations.get(index).ok_or(CharLmError::IndexOutOfRange {
			index,
			len: self.observations.len(),
		})
	}

	/// Returns the first observation, if any.
	pub fn first(&self) -> Option<&CharacterObservation> {
		self.observations.first()
	}

	/// Removes the observation for `character`.
	///
	/// Returns `true` if it was present. Probabilities are not recomputed.
	pub fn remove(&mut self, character: char) -> bool {
		match self.index_of(character) {
			Some(index) => {
				self.observations.remove(index);
				true
			}
			None => false,
		}
	}

	/// Copies the observations out, in iteration order.
	pub fn to_vec(&self) -> Vec<CharacterObservation> {
		self.observations.clone()
	}

	/// Iterates over the observations, first-seen-first.
	pub fn iter(&self) -> impl Iterator<Item = &CharacterObservation> {
		self.observations.iter()
	}

	/// Number of distinct characters.
	pub fn len(&self) -> usize {
		self.observations.len()
	}

	/// Whether no character has been recorded.
	pub fn is_empty(&self) -> bool {
		self.observations.is_empty()
	}

	/// Sum of all occurrence counts.
	pub fn total_count(&self) -> u64 {
		self.observations.iter().map(|o| o.count).sum()
	}
}

impl fmt::Display for FrequencyTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, observation) in self.observations.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{observation}")?;
		}
		write!(f, ")")
	}
}
