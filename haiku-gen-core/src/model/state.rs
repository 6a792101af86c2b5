use crate::error::Result;
use crate::syllables::SyllableCounter;

/// Represents a state in a word n-gram model.
///
/// A `State` corresponds to a fixed prefix of one or more words (`key`) and
/// stores every word observed right after this prefix in the corpus.
///
/// Conceptually, this is a node in a Markov chain. Outgoing edges are not
/// weighted explicitly: a successor seen three times is stored three times,
/// so a uniform pick over the list is a frequency-weighted pick.
///
/// ## Invariants
/// - All suffixes belong to the same `key`
/// - A state is only created together with its first suffix, so the list
///   is never empty
/// - Suffixes keep their corpus order
#[derive(Clone, Debug)]
pub struct State {
	/// Identifier of the state (words joined by a single space).
	key: String,
	/// Observed successors, duplicates included.
	/// Example: ["jug", "jug", "cup"]
	suffixes: Vec<String>,
}

impl State {
	/// Creates a state for `key` holding its first observed suffix.
	pub fn new(key: &str, suffix: &str) -> Self {
		Self {
			key: key.to_owned(),
			suffixes: vec![suffix.to_owned()],
		}
	}

	/// Records one more occurrence of `suffix` after this prefix.
	pub fn add_suffix(&mut self, suffix: &str) {
		self.suffixes.push(suffix.to_owned());
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn suffixes(&self) -> &[String] {
		&self.suffixes
	}

	/// Returns the suffixes that still fit in the syllable budget.
	///
	/// A suffix is accepted when `current_syls + syllables(suffix) <= target_syls`.
	/// Duplicates survive the filter so they keep weighting the next pick.
	///
	/// # Errors
	/// Propagates `UnknownWord` from the syllable counter.
	pub fn candidates<S: SyllableCounter + ?Sized>(
		&self,
		counter: &S,
		current_syls: usize,
		target_syls: usize,
	) -> Result<Vec<&str>> {
		let mut accepted = Vec::new();
		for suffix in &self.suffixes {
			if current_syls + counter.count(suffix)? <= target_syls {
				accepted.push(suffix.as_str());
			}
		}
		Ok(accepted)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syllables::SyllableOracle;

	fn oracle() -> SyllableOracle {
		SyllableOracle::from_overrides([("sake", 2), ("jug", 1), ("cup", 1), ("cinnamon", 3)])
	}

	#[test]
	fn duplicates_are_kept_in_order() {
		let mut state = State::new("sake", "jug");
		state.add_suffix("cup");
		state.add_suffix("jug");
		assert_eq!(state.key(), "sake");
		assert_eq!(state.suffixes(), &["jug", "cup", "jug"]);
	}

	#[test]
	fn candidates_respect_budget() {
		let mut state = State::new("sake", "jug");
		state.add_suffix("cinnamon");
		state.add_suffix("jug");
		let accepted = state.candidates(&oracle(), 3, 5).unwrap();
		assert_eq!(accepted, vec!["jug", "jug"]);
		let accepted = state.candidates(&oracle(), 2, 5).unwrap();
		assert_eq!(accepted, vec!["jug", "cinnamon", "jug"]);
	}

	#[test]
	fn candidates_surface_unknown_words() {
		let state = State::new("sake", "zyzzyva");
		assert!(state.candidates(&oracle(), 0, 5).is_err());
	}
}
