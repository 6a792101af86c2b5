use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HaikuError, Result};
use crate::io::read_file;

/// Parameters controlling line generation.
///
/// # Responsibilities
/// - Bound every sampling retry loop so an unreachable syllable target fails
///   with `GenerationExhausted` instead of looping forever
/// - Bound the syllables of the random first word of a haiku
/// - Optionally fix the random seed for reproducible output
///
/// Missing fields in a JSON config fall back to their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
	/// Maximum number of fallback samples (prefix resamples, rejected
	/// candidates, rejected first words) allowed for one line.
	max_retries: usize,

	/// The random first word of line 1 must have at most this many syllables.
	first_word_max_syllables: usize,

	/// Maximum number of words appended to a single line.
	max_line_words: usize,

	/// Seed of the random source, `None` for OS entropy.
	pub seed: Option<u64>,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			max_retries: 10_000,
			first_word_max_syllables: 4,
			max_line_words: 32,
			seed: None,
		}
	}
}

impl GenerationConfig {
	/// Reads a JSON config file and validates it.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let config: Self = serde_json::from_str(&read_file(filepath)?)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that every bound is strictly positive.
	pub fn validate(&self) -> Result<()> {
		if self.max_retries == 0 {
			return Err(HaikuError::InvalidConfig("max_retries must be > 0".to_owned()));
		}
		if self.first_word_max_syllables == 0 {
			return Err(HaikuError::InvalidConfig("first_word_max_syllables must be > 0".to_owned()));
		}
		if self.max_line_words == 0 {
			return Err(HaikuError::InvalidConfig("max_line_words must be > 0".to_owned()));
		}
		Ok(())
	}

	pub fn max_retries(&self) -> usize {
		self.max_retries
	}

	pub fn first_word_max_syllables(&self) -> usize {
		self.first_word_max_syllables
	}

	pub fn max_line_words(&self) -> usize {
		self.max_line_words
	}

	/// Sets the retry bound.
	///
	/// # Errors
	/// Returns an error if `max_retries` is 0.
	pub fn set_max_retries(&mut self, max_retries: usize) -> Result<()> {
		if max_retries == 0 {
			return Err(HaikuError::InvalidConfig("max_retries must be > 0".to_owned()));
		}
		self.max_retries = max_retries;
		Ok(())
	}

	/// Sets the first word syllable bound.
	///
	/// # Errors
	/// Returns an error if `syllables` is 0.
	pub fn set_first_word_max_syllables(&mut self, syllables: usize) -> Result<()> {
		if syllables == 0 {
			return Err(HaikuError::InvalidConfig("first_word_max_syllables must be > 0".to_owned()));
		}
		self.first_word_max_syllables = syllables;
		Ok(())
	}

	/// Sets the per-line word bound.
	///
	/// # Errors
	/// Returns an error if `words` is 0.
	pub fn set_max_line_words(&mut self, words: usize) -> Result<()> {
		if words == 0 {
			return Err(HaikuError::InvalidConfig("max_line_words must be > 0".to_owned()));
		}
		self.max_line_words = words;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn setters_reject_zero() {
		let mut config = GenerationConfig::default();
		assert!(config.set_max_retries(0).is_err());
		assert!(config.set_first_word_max_syllables(0).is_err());
		assert!(config.set_max_line_words(0).is_err());
		assert_eq!(config, GenerationConfig::default());

		config.set_max_retries(50).unwrap();
		assert_eq!(config.max_retries(), 50);
	}

	#[test]
	fn partial_json_uses_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.json");
		std::fs::write(&path, r#"{ "seed": 42, "max_retries": 500 }"#).unwrap();

		let config = GenerationConfig::load(&path).unwrap();
		assert_eq!(config.seed, Some(42));
		assert_eq!(config.max_retries(), 500);
		assert_eq!(config.first_word_max_syllables(), 4);
	}

	#[test]
	fn invalid_json_config_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.json");
		std::fs::write(&path, r#"{ "max_line_words": 0 }"#).unwrap();
		assert!(matches!(GenerationConfig::load(&path), Err(HaikuError::InvalidConfig(_))));
	}
}
