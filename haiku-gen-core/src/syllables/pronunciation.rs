use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::{build_output_path, read_lines};

/// Syllable counts parsed from a CMU Pronouncing Dictionary file.
///
/// Each entry maps a lowercase word to the number of stressed phonemes
/// (phonemes ending in a digit) of its first pronunciation variant.
///
/// The table is built once at startup and never mutated afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PronunciationTable {
	syllables: HashMap<String, usize>,
}

/// Entry tagged with the line it came from, so that chunks parsed in any
/// order still keep the first variant.
type PartialTable = HashMap<String, (usize, usize)>;

impl PronunciationTable {
	/// Loads the table from a binary cache if one exists, otherwise parses the
	/// dictionary file and writes the cache.
	///
	/// - `filepath` is the dictionary text file (`cmudict.dict`).
	/// - The cache sits next to it with a `.bin` extension.
	/// - Uses `postcard` for compact serialization/deserialization.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		let table: Self = if binary_data_path.exists() {
			let bytes = std::fs::read(&binary_data_path)?;
			postcard::from_bytes(&bytes)?
		} else {
			let table = Self::read_dictionary_file(&filepath)?;
			let bytes = postcard::to_stdvec(&table)?;
			std::fs::write(&binary_data_path, bytes)?;
			table
		};
		info!("Loaded pronunciation table ({} words)", table.len());
		Ok(table)
	}

	fn read_dictionary_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
		let lines = read_lines(&filename)?;
		Ok(Self::from_lines(lines))
	}

	/// Parses chunks of lines in parallel and merges the partial tables.
	///
	/// # Behavior
	/// - Splits input lines into chunks (based on CPU cores * factor).
	/// - Spawns threads to parse each chunk.
	/// - Merges partial tables, keeping the entry from the earliest line.
	fn from_lines(lines: Vec<String>) -> Self {
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		for (chunk_index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			let first_line = chunk_index * chunk_size;

			thread::spawn(move || {
				let mut partial: PartialTable = HashMap::new();
				for (offset, line) in chunk.iter().enumerate() {
					if let Some((word, count)) = parse_line(line) {
						partial.entry(word).or_insert((first_line + offset, count));
					}
				}
				// The receiver outlives every sender
				let _ = tx.send(partial);
			});
		}
		drop(tx);

		let mut merged: PartialTable = HashMap::new();
		for partial in rx.iter() {
			for (word, (line, count)) in partial {
				match merged.get_mut(&word) {
					Some(existing) if existing.0 <= line => (),
					Some(existing) => *existing = (line, count),
					None => {
						merged.insert(word, (line, count));
					}
				}
			}
		}

		Self {
			syllables: merged.into_iter().map(|(word, (_, count))| (word, count)).collect(),
		}
	}

	/// Parses dictionary text held in memory.
	pub fn parse(text: &str) -> Self {
		Self::from_lines(text.lines().map(str::to_owned).collect())
	}

	pub fn get(&self, word: &str) -> Option<usize> {
		self.syllables.get(word).copied()
	}

	pub fn len(&self) -> usize {
		self.syllables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.syllables.is_empty()
	}
}

/// Parses one dictionary line into `(word, syllables)`.
///
/// Accepted forms:
/// - `HAIKU  HH AY1 K UW0`
/// - `haiku(2) HH AY1 K UW2` (variant marker removed from the word)
/// - trailing `# comment` is ignored
///
/// Returns `None` for blank lines, `;;;` comments and lines without phonemes.
fn parse_line(line: &str) -> Option<(String, usize)> {
	if line.starts_with(";;;") {
		return None;
	}
	let line = match line.find('#') {
		Some(pos) => &line[..pos],
		None => line,
	};

	let mut parts = line.split_whitespace();
	let raw_word = parts.next()?;
	let word = match raw_word.find('(') {
		Some(pos) if raw_word.ends_with(')') && pos > 0 => &raw_word[..pos],
		_ => raw_word,
	};

	let mut phonemes = 0;
	let mut stressed = 0;
	for phoneme in parts {
		phonemes += 1;
		if phoneme.chars().last().is_some_and(|c| c.is_ascii_digit()) {
			stressed += 1;
		}
	}
	if phonemes == 0 {
		return None;
	}

	Some((word.to_lowercase(), stressed))
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = ";;; sample of the CMU dictionary
HAIKU  HH AY1 K UW0
HAIKU(2)  HH AY1 K UW2 Z IY0
POND  P AA1 N D
water W AO1 T ER0 # trailing comment
EMPTY
";

	#[test]
	fn parse_line_counts_stress_markers() {
		assert_eq!(parse_line("HAIKU  HH AY1 K UW0"), Some(("haiku".to_owned(), 2)));
		assert_eq!(parse_line("FIRE(1)  F AY1 ER0"), Some(("fire".to_owned(), 2)));
		assert_eq!(parse_line(";;; comment"), None);
		assert_eq!(parse_line("   "), None);
	}

	#[test]
	fn parse_keeps_first_variant() {
		let table = PronunciationTable::parse(SAMPLE);
		assert_eq!(table.get("haiku"), Some(2));
		assert_eq!(table.get("pond"), Some(1));
		assert_eq!(table.get("water"), Some(2));
		assert_eq!(table.get("empty"), None);
		assert_eq!(table.len(), 3);
	}

	#[test]
	fn first_variant_wins_across_chunks() {
		// Enough lines to spread the variants over several chunks
		let mut text = String::new();
		text.push_str("DEW  D UW1\n");
		for i in 0..2000 {
			text.push_str(&format!("FILLER{i}  F IH1 L ER0\n"));
		}
		text.push_str("DEW(2)  D Y UW1 IY0 AH0\n");
		let table = PronunciationTable::parse(&text);
		assert_eq!(table.get("dew"), Some(1));
		assert_eq!(table.len(), 2001);
	}

	#[test]
	fn load_writes_and_reuses_cache() {
		let dir = tempfile::tempdir().unwrap();
		let dict_path = dir.path().join("cmudict.dict");
		std::fs::write(&dict_path, SAMPLE).unwrap();

		let table = PronunciationTable::load(&dict_path).unwrap();
		let cache_path = dir.path().join("cmudict.bin");
		assert!(cache_path.exists());

		// The cache is used even once the text file is gone
		std::fs::remove_file(&dict_path).unwrap();
		assert_eq!(PronunciationTable::load(&dict_path).unwrap(), table);
	}

	#[test]
	fn missing_dictionary_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let result = PronunciationTable::load(dir.path().join("absent.dict"));
		assert!(matches!(result, Err(crate::error::HaikuError::Io(_))));
	}
}
