//! Syllable counting for English words and phrases.
//!
//! Counts come from two read-only sources built once at startup:
//! - a manually curated override table (`missing_words.json`), checked first
//! - a CMU Pronouncing Dictionary table (`PronunciationTable`)

use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::error::{HaikuError, Result};
use crate::io::read_file;

/// CMU dictionary parsing and binary caching.
pub mod pronunciation;

pub use pronunciation::PronunciationTable;

/// Anything able to count the syllables of a word or phrase.
///
/// Line generation only depends on this trait, so tests and callers may plug
/// in their own tables.
pub trait SyllableCounter {
	/// Counts the syllables of `text`.
	///
	/// # Errors
	/// Returns `UnknownWord` when a word has no known count.
	fn count(&self, text: &str) -> Result<usize>;
}

/// Syllable counter backed by an override table and a pronunciation table.
#[derive(Clone, Debug, Default)]
pub struct SyllableOracle {
	pronunciations: PronunciationTable,
	overrides: HashMap<String, usize>,
}

impl SyllableOracle {
	pub fn new(pronunciations: PronunciationTable, overrides: HashMap<String, usize>) -> Self {
		let overrides = overrides
			.into_iter()
			.map(|(word, count)| (word.to_lowercase(), count))
			.collect();
		Self { pronunciations, overrides }
	}

	/// Loads the pronunciation dictionary and, if given, the override table.
	pub fn load<P, Q>(dictionary: P, overrides: Option<Q>) -> Result<Self>
	where
		P: AsRef<Path>,
		Q: AsRef<Path>,
	{
		let pronunciations = PronunciationTable::load(dictionary)?;
		let overrides = match overrides {
			Some(path) => load_overrides(path)?,
			None => HashMap::new(),
		};
		Ok(Self::new(pronunciations, overrides))
	}

	/// Builds an oracle from override entries only.
	///
	/// Handy for small vocabularies where no dictionary file is available.
	pub fn from_overrides<I, K>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, usize)>,
		K: AsRef<str>,
	{
		let overrides = entries
			.into_iter()
			.map(|(word, count)| (word.as_ref().to_owned(), count))
			.collect();
		Self::new(PronunciationTable::default(), overrides)
	}

	/// Syllables of a single already normalized word.
	fn lookup(&self, word: &str) -> Option<usize> {
		self.overrides
			.get(word)
			.copied()
			.or_else(|| self.pronunciations.get(word))
	}
}

impl SyllableCounter for SyllableOracle {
	fn count(&self, text: &str) -> Result<usize> {
		let text = text.replace('-', " ").to_lowercase();
		let mut total = 0;
		for raw in text.split_whitespace() {
			let word = normalize_word(raw);
			if word.is_empty() {
				return Err(HaikuError::UnknownWord(raw.to_owned()));
			}
			total += self
				.lookup(word)
				.ok_or_else(|| HaikuError::UnknownWord(word.to_owned()))?;
		}
		Ok(total)
	}
}

/// Strips surrounding ASCII punctuation and a trailing possessive `'s`.
///
/// Expects lowercase input.
pub fn normalize_word(word: &str) -> &str {
	let word = word.trim_matches(|c: char| c.is_ascii_punctuation());
	word.strip_suffix("'s")
		.or_else(|| word.strip_suffix("\u{2019}s"))
		.unwrap_or(word)
}

/// Reads an override table: a JSON object mapping words to syllable counts.
pub fn load_overrides<P: AsRef<Path>>(filepath: P) -> Result<HashMap<String, usize>> {
	let overrides: HashMap<String, usize> = serde_json::from_str(&read_file(&filepath)?)?;
	info!("Loaded {} syllable overrides from {}", overrides.len(), filepath.as_ref().display());
	Ok(overrides)
}
