use super::state::State;
use crate::error::{HaikuError, Result};
use std::collections::HashMap;

/// Represents an n-gram model over corpus words.
///
/// The `NGramModel` stores one state per prefix of `n-1` words and the
/// words observed right after it.
///
/// # Responsibilities
/// - Build the model from an ordered token sequence with a single linear scan
/// - Look up the state of a prefix
///
/// # Invariants
/// - `n` is always >= 2
/// - Each state in `states` corresponds to a unique prefix of `n-1` words
/// - Every state holds at least one suffix
/// - Tokens are used as-is: no case folding, no punctuation stripping
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// The order of the model (number of words in the n-gram)
	n: usize, // must be >= 2

	/// Mapping from a prefix (n-1 words joined by a space) to its state
	states: HashMap<String, State>,
}

impl NGramModel {
	/// Creates a new n-gram model of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 2`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 2 {
			return Err(HaikuError::InvalidConfig("n must be >= 2".to_owned()));
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// Joins prefix words into a state key.
	///
	/// The key is order sensitive: `["a", "b"]` and `["b", "a"]` differ.
	pub fn key<S: AsRef<str>>(words: &[S]) -> String {
		words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
	}

	/// Adds an ordered token sequence to the model.
	///
	/// For every window of `n` tokens, the last token is appended to the
	/// state of the first `n-1`. Sequences shorter than `n` add nothing.
	pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
		if tokens.len() < self.n {
			// Sequence too short, no n-grams to compute
			return;
		}

		for window in tokens.windows(self.n) {
			let prefix = Self::key(&window[..self.n - 1]);
			let suffix = window[self.n - 1].as_ref();

			match self.states.get_mut(&prefix) {
				Some(state) => state.add_suffix(suffix),
				None => {
					let state = State::new(&prefix, suffix);
					self.states.insert(prefix, state);
				}
			}
		}
	}

	/// Returns the state of a prefix key, `None` if it was never observed.
	pub fn get(&self, key: &str) -> Option<&State> {
		self.states.get(key)
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn order_below_two_is_rejected() {
		assert!(NGramModel::new(1).is_err());
		assert!(NGramModel::new(0).is_err());
	}

	#[test]
	fn bigram_keeps_duplicate_suffixes() {
		let mut model = NGramModel::new(2).unwrap();
		model.add_tokens(&["a", "b", "a", "b", "a", "c"]);
		assert_eq!(model.get("a").unwrap().suffixes(), &["b", "b", "c"]);
		assert_eq!(model.get("b").unwrap().suffixes(), &["a", "a"]);
		assert!(model.get("c").is_none());
	}

	#[test]
	fn trigram_key_is_order_sensitive() {
		let mut model = NGramModel::new(3).unwrap();
		model.add_tokens(&["sake", "jug", "cold", "jug", "sake", "warm"]);
		assert_eq!(model.get("sake jug").unwrap().suffixes(), &["cold"]);
		assert_eq!(model.get("jug sake").unwrap().suffixes(), &["warm"]);
		assert_eq!(model.len(), 4);
	}

	#[test]
	fn case_and_punctuation_are_distinct_keys() {
		let mut model = NGramModel::new(2).unwrap();
		model.add_tokens(&["Frog", "jumps", "frog,", "sits"]);
		assert_eq!(model.get("Frog").unwrap().suffixes(), &["jumps"]);
		assert_eq!(model.get("frog,").unwrap().suffixes(), &["sits"]);
		assert!(model.get("frog").is_none());
	}

	#[test]
	fn short_sequence_adds_nothing() {
		let mut model = NGramModel::new(3).unwrap();
		model.add_tokens(&["old", "pond"]);
		assert!(model.is_empty());
	}

	#[test]
	fn key_joins_with_space() {
		assert_eq!(NGramModel::key(&["old", "pond"]), "old pond");
	}
}
