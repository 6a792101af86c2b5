use std::path::Path;

use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::Result;
use crate::io::read_file;

/// Ordered, immutable sequence of training tokens.
///
/// Tokens are raw whitespace-delimited strings: no case folding and no
/// punctuation stripping happen here. Normalization only takes place inside
/// syllable counting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
	tokens: Vec<String>,
}

impl Corpus {
	/// Builds a corpus from training text.
	///
	/// Newlines are replaced by spaces, then the text is split on whitespace.
	pub fn from_text(text: &str) -> Self {
		let tokens = text
			.replace('\n', " ")
			.split_whitespace()
			.map(str::to_owned)
			.collect();
		Self { tokens }
	}

	/// Loads a corpus from a training text file.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let corpus = Self::from_text(&read_file(&filepath)?);
		info!("Loaded corpus {} ({} tokens)", filepath.as_ref().display(), corpus.len());
		Ok(corpus)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn get(&self, index: usize) -> Option<&str> {
		self.tokens.get(index).map(String::as_str)
	}

	/// Returns a uniformly random token, `None` if the corpus is empty.
	pub fn random_token<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.tokens.choose(rng).map(String::as_str)
	}

	/// Returns a uniformly random pair of adjacent tokens.
	///
	/// Returns `None` if the corpus holds fewer than two tokens.
	pub fn random_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&str, &str)> {
		if self.tokens.len() < 2 {
			return None;
		}
		let index = rng.random_range(0..self.tokens.len() - 1);
		Some((&self.tokens[index], &self.tokens[index + 1]))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn newlines_become_separators() {
		let corpus = Corpus::from_text("old pond\nfrog  jumps\n\nin");
		assert_eq!(corpus.tokens(), &["old", "pond", "frog", "jumps", "in"]);
	}

	#[test]
	fn tokens_keep_case_and_punctuation() {
		let corpus = Corpus::from_text("The frog's, LEAP!");
		assert_eq!(corpus.tokens(), &["The", "frog's,", "LEAP!"]);
	}

	#[test]
	fn random_pair_is_adjacent() {
		let corpus = Corpus::from_text("a b c d e");
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..50 {
			let (first, second) = corpus.random_pair(&mut rng).unwrap();
			let index = corpus.tokens().iter().position(|t| t == first).unwrap();
			assert_eq!(corpus.get(index + 1), Some(second));
		}
	}

	#[test]
	fn tiny_corpus_has_no_pair() {
		let mut rng = StdRng::seed_from_u64(7);
		assert!(Corpus::from_text("alone").random_pair(&mut rng).is_none());
		assert!(Corpus::default().random_token(&mut rng).is_none());
	}

	#[test]
	fn load_reads_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("train.txt");
		std::fs::write(&path, "cool wind\nsake jug").unwrap();
		assert_eq!(Corpus::load(&path).unwrap().len(), 4);
	}
}
