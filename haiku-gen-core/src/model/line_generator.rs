use std::cmp::Ordering;

use log::{debug, warn};
use rand::Rng;

use super::generation_config::GenerationConfig;
use super::state::State;
use super::transition_index::TransitionIndex;
use crate::corpus::Corpus;
use crate::error::{HaikuError, Result};
use crate::syllables::SyllableCounter;

/// Last two words of a completed line.
///
/// Used as the order-2 context that starts the next line. Empty before the
/// first line of a haiku.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineState {
	words: Vec<String>,
}

impl LineState {
	/// State with no context: the next line is a first line.
	pub fn empty() -> Self {
		Self::default()
	}

	/// State carrying an explicit word pair.
	pub fn from_pair(first: &str, second: &str) -> Self {
		Self { words: vec![first.to_owned(), second.to_owned()] }
	}

	/// Takes the (up to) two trailing words of `words`.
	fn from_tail(words: &[String]) -> Self {
		let start = words.len().saturating_sub(2);
		Self { words: words[start..].to_vec() }
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

/// Counts fallback samples for one line and fails once the bound is hit.
struct RetryBudget {
	target: usize,
	attempts: usize,
	max: usize,
}

impl RetryBudget {
	fn new(target: usize, max: usize) -> Self {
		Self { target, attempts: 0, max }
	}

	fn spend(&mut self) -> Result<()> {
		self.attempts += 1;
		if self.attempts > self.max {
			warn!("No {}-syllable line found after {} attempts", self.target, self.max);
			return Err(HaikuError::GenerationExhausted { target: self.target, attempts: self.max });
		}
		Ok(())
	}
}

/// Builds single lines with an exact syllable count.
///
/// # Behavior
/// - First line (empty seed): a random corpus word with few enough syllables,
///   then one order-1 successor, then order-2 continuation if needed.
/// - Other lines: order-2 continuation from the seed pair; the seed words are
///   context only and are not part of the returned line.
/// - When no successor fits the remaining budget, the prefix is resampled
///   anywhere in the corpus.
///
/// Every fallback sample is bounded by `GenerationConfig::max_retries`.
pub struct LineGenerator<'a, S: SyllableCounter + ?Sized> {
	corpus: &'a Corpus,
	index: &'a TransitionIndex,
	counter: &'a S,
	config: &'a GenerationConfig,
}

impl<'a, S: SyllableCounter + ?Sized> LineGenerator<'a, S> {
	pub fn new(
		corpus: &'a Corpus,
		index: &'a TransitionIndex,
		counter: &'a S,
		config: &'a GenerationConfig,
	) -> Self {
		Self { corpus, index, counter, config }
	}

	/// Generates one line of exactly `target_syls` syllables.
	///
	/// # Returns
	/// The words of the line and the state to seed the next line with. The
	/// state is always the last two words emitted so far, seed included.
	///
	/// # Errors
	/// - `UnknownWord` if a sampled word has no syllable count
	/// - `GenerationExhausted` if a retry bound is reached
	/// - `EmptyModel` if the corpus cannot provide a fallback prefix
	pub fn generate<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		target_syls: usize,
		seed: &LineState,
	) -> Result<(Vec<String>, LineState)> {
		let mut budget = RetryBudget::new(target_syls, self.config.max_retries());
		let first_line = seed.is_empty();
		let mut line_syls = 0;
		let mut current_line: Vec<String>;

		if first_line {
			let (word, syls) = self.random_word(rng, &mut budget)?;
			line_syls += syls;

			let mut prefix = word.to_owned();
			current_line = vec![prefix.clone()];
			let mut choices = self.candidates(self.index.after_word(&prefix), line_syls, target_syls)?;
			while choices.is_empty() {
				budget.spend()?;
				prefix = self.corpus.random_token(rng).ok_or(HaikuError::EmptyModel)?.to_owned();
				debug!("new random prefix = {prefix}");
				choices = self.candidates(self.index.after_word(&prefix), line_syls, target_syls)?;
			}

			let word = pick(rng, &choices);
			let syls = self.counter.count(word)?;
			debug!("word & syllables = {word} {syls}");
			line_syls += syls;
			current_line.push(word.to_owned());

			if line_syls == target_syls {
				let state = LineState::from_tail(&current_line);
				return Ok((current_line, state));
			}
		} else {
			current_line = seed.words().to_vec();
		}

		let context_len = if first_line { 0 } else { seed.words().len() };
		loop {
			if current_line.len() - context_len >= self.config.max_line_words() {
				warn!("Line reached {} words without hitting {target_syls} syllables", self.config.max_line_words());
				return Err(HaikuError::GenerationExhausted { target: target_syls, attempts: budget.attempts });
			}

			let last = current_line.len() - 1;
			let mut choices = self.candidates(
				self.index.after_pair(&current_line[last - 1], &current_line[last]),
				line_syls,
				target_syls,
			)?;
			while choices.is_empty() {
				budget.spend()?;
				let (first, second) = self.corpus.random_pair(rng).ok_or(HaikuError::EmptyModel)?;
				debug!("new random prefix = {first} {second}");
				choices = self.candidates(self.index.after_pair(first, second), line_syls, target_syls)?;
			}

			let word = pick(rng, &choices);
			let syls = self.counter.count(word)?;
			debug!("word & syllables = {word} {syls}");

			match (line_syls + syls).cmp(&target_syls) {
				Ordering::Greater => budget.spend()?,
				Ordering::Less => {
					current_line.push(word.to_owned());
					line_syls += syls;
				}
				Ordering::Equal => {
					current_line.push(word.to_owned());
					break;
				}
			}
		}

		let state = LineState::from_tail(&current_line);
		current_line.drain(..context_len);
		Ok((current_line, state))
	}

	/// Draws corpus words until one has at most `first_word_max_syllables`.
	fn random_word<R: Rng + ?Sized>(&self, rng: &mut R, budget: &mut RetryBudget) -> Result<(&'a str, usize)> {
		let corpus: &'a Corpus = self.corpus;
		loop {
			let word = corpus.random_token(rng).ok_or(HaikuError::EmptyModel)?;
			let syls = self.counter.count(word)?;
			if syls <= self.config.first_word_max_syllables() {
				debug!("random word & syllables = {word} {syls}");
				return Ok((word, syls));
			}
			budget.spend()?;
		}
	}

	/// Suffixes of `state` that fit the remaining budget, empty if the prefix
	/// was never observed.
	fn candidates(&self, state: Option<&'a State>, current_syls: usize, target_syls: usize) -> Result<Vec<&'a str>> {
		let accepted = match state {
			Some(state) => state.candidates(self.counter, current_syls, target_syls)?,
			None => Vec::new(),
		};
		if let Some(state) = state {
			debug!("accepted words after \"{}\" = {:?}", state.key(), accepted);
		}
		Ok(accepted)
	}
}

/// Uniform pick over a non-empty candidate list.
fn pick<'w, R: Rng + ?Sized>(rng: &mut R, choices: &[&'w str]) -> &'w str {
	choices[rng.random_range(0..choices.len())]
}
