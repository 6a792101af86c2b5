use log::info;

use super::ngram_model::NGramModel;
use super::state::State;
use crate::corpus::Corpus;

/// Word transition maps derived from a corpus.
///
/// This struct holds:
/// - `order1`: one word → words observed after it (bigrams)
/// - `order2`: two words → words observed after the pair (trigrams)
///
/// Both maps are built once by a linear scan and are read-only afterwards.
/// Suffix lists keep corpus order and duplicates, so a seeded random source
/// reproduces the same selections.
#[derive(Clone, Debug)]
pub struct TransitionIndex {
	order1: NGramModel,
	order2: NGramModel,
}

impl TransitionIndex {
	/// Builds both transition maps from `corpus`.
	///
	/// An empty or single-token corpus yields empty maps; see
	/// [`TransitionIndex::is_empty`].
	pub fn build(corpus: &Corpus) -> Self {
		// Orders 2 and 3 are always valid
		let mut order1 = NGramModel::new(2).expect("bigram order is valid");
		let mut order2 = NGramModel::new(3).expect("trigram order is valid");
		order1.add_tokens(corpus.tokens());
		order2.add_tokens(corpus.tokens());

		info!(
			"Built transition index: {} single-word prefixes, {} word-pair prefixes",
			order1.len(),
			order2.len()
		);
		Self { order1, order2 }
	}

	/// Successors of a single word.
	pub fn after_word(&self, word: &str) -> Option<&State> {
		self.order1.get(word)
	}

	/// Successors of an ordered word pair.
	pub fn after_pair(&self, first: &str, second: &str) -> Option<&State> {
		self.order2.get(&NGramModel::key(&[first, second]))
	}

	/// `true` when either map has no entry at all.
	///
	/// Generation cannot succeed from such an index.
	pub fn is_empty(&self) -> bool {
		self.order1.is_empty() || self.order2.is_empty()
	}

	pub fn order1(&self) -> &NGramModel {
		&self.order1
	}

	pub fn order2(&self) -> &NGramModel {
		&self.order2
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn order1_preserves_successor_order() {
		let index = TransitionIndex::build(&Corpus::from_text("a b a c"));
		assert_eq!(index.after_word("a").unwrap().suffixes(), &["b", "c"]);
		assert_eq!(index.after_word("b").unwrap().suffixes(), &["a"]);
		assert!(index.after_word("c").is_none());
	}

	#[test]
	fn order2_maps_pairs() {
		let index = TransitionIndex::build(&Corpus::from_text("a b a c"));
		assert_eq!(index.after_pair("a", "b").unwrap().suffixes(), &["a"]);
		assert_eq!(index.after_pair("b", "a").unwrap().suffixes(), &["c"]);
		assert!(index.after_pair("a", "c").is_none());
		assert_eq!(index.order2().len(), 2);
	}

	#[test]
	fn repeated_successors_are_retained() {
		let index = TransitionIndex::build(&Corpus::from_text("sake jug sake jug sake cup"));
		assert_eq!(index.after_word("sake").unwrap().suffixes(), &["jug", "jug", "cup"]);
		assert_eq!(index.after_pair("jug", "sake").unwrap().suffixes(), &["jug", "cup"]);
	}

	#[test]
	fn tiny_corpora_are_empty() {
		assert!(TransitionIndex::build(&Corpus::default()).is_empty());
		assert!(TransitionIndex::build(&Corpus::from_text("alone")).is_empty());
		// One bigram but no trigram
		let index = TransitionIndex::build(&Corpus::from_text("two words"));
		assert!(!index.order1().is_empty());
		assert!(index.is_empty());
	}
}
