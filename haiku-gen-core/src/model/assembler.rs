use std::fmt;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::generation_config::GenerationConfig;
use super::line_generator::{LineGenerator, LineState};
use super::transition_index::TransitionIndex;
use crate::corpus::Corpus;
use crate::error::{HaikuError, Result};
use crate::syllables::SyllableCounter;

/// Syllable targets of the three haiku lines.
pub const HAIKU_TARGETS: [usize; 3] = [5, 7, 5];

/// Three lines of words, with 5, 7 and 5 syllables.
///
/// Only replaced line by line, never edited in place.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Haiku {
	lines: [Vec<String>; 3],
}

impl Haiku {
	pub fn lines(&self) -> &[Vec<String>; 3] {
		&self.lines
	}

	/// Line `number` (1-based) joined with single spaces.
	pub fn line_text(&self, number: usize) -> Option<String> {
		let index = number.checked_sub(1)?;
		self.lines.get(index).map(|words| words.join(" "))
	}
}

impl fmt::Display for Haiku {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text: Vec<String> = self.lines.iter().map(|words| words.join(" ")).collect();
		write!(f, "{}", text.join("\n"))
	}
}

/// Current haiku and the line states captured while building it.
#[derive(Clone, Debug)]
struct Draft {
	haiku: Haiku,
	/// `states[i]` is the state produced by line `i + 1`.
	states: [LineState; 3],
}

/// High-level haiku generator.
///
/// # Responsibilities
/// - Own the corpus, transition index, syllable counter and random source
/// - Chain three line generations, seeding each line with the previous one
/// - Regenerate line 2 or line 3 from the captured states
///
/// Regenerating line 2 does not touch line 3: its text is kept even though it
/// was seeded by the old line 2. Regenerate line 3 explicitly to refresh it.
pub struct HaikuAssembler<S: SyllableCounter> {
	corpus: Corpus,
	index: TransitionIndex,
	counter: S,
	config: GenerationConfig,
	rng: StdRng,
	draft: Option<Draft>,
}

impl<S: SyllableCounter> HaikuAssembler<S> {
	/// Builds the transition index and the random source.
	///
	/// # Errors
	/// - `EmptyModel` if the corpus yields no order-1 or no order-2 transition
	/// - `InvalidConfig` if a bound of `config` is 0
	pub fn new(corpus: Corpus, counter: S, config: GenerationConfig) -> Result<Self> {
		config.validate()?;
		let index = TransitionIndex::build(&corpus);
		if index.is_empty() {
			return Err(HaikuError::EmptyModel);
		}
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		info!("Haiku assembler ready ({} corpus tokens)", corpus.len());
		Ok(Self { corpus, index, counter, config, rng, draft: None })
	}

	/// Generates a full haiku and captures the three line states.
	///
	/// On error the previous haiku, if any, is kept.
	pub fn generate(&mut self) -> Result<&Haiku> {
		let (line1, state1) = self.line(HAIKU_TARGETS[0], &LineState::empty())?;
		let (line2, state2) = self.line(HAIKU_TARGETS[1], &state1)?;
		let (line3, state3) = self.line(HAIKU_TARGETS[2], &state2)?;

		let draft = self.draft.insert(Draft {
			haiku: Haiku { lines: [line1, line2, line3] },
			states: [state1, state2, state3],
		});
		Ok(&draft.haiku)
	}

	/// Replaces line 2, seeded by the state of line 1.
	///
	/// # Errors
	/// `NoHaikuGenerated` if `generate` never succeeded.
	pub fn regenerate_line2(&mut self) -> Result<&Haiku> {
		self.regenerate(2)
	}

	/// Replaces line 3, seeded by the last captured state of line 2.
	///
	/// # Errors
	/// `NoHaikuGenerated` if `generate` never succeeded.
	pub fn regenerate_line3(&mut self) -> Result<&Haiku> {
		self.regenerate(3)
	}

	/// Current haiku, `None` before the first successful `generate`.
	pub fn haiku(&self) -> Option<&Haiku> {
		self.draft.as_ref().map(|draft| &draft.haiku)
	}

	/// State produced by line `number` (1-based) of the current haiku.
	pub fn line_state(&self, number: usize) -> Option<&LineState> {
		let index = number.checked_sub(1)?;
		self.draft.as_ref()?.states.get(index)
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	fn regenerate(&mut self, number: usize) -> Result<&Haiku> {
		let seed = match &self.draft {
			Some(draft) => draft.states[number - 2].clone(),
			None => return Err(HaikuError::NoHaikuGenerated),
		};
		let (line, state) = self.line(HAIKU_TARGETS[number - 1], &seed)?;

		let draft = self.draft.as_mut().ok_or(HaikuError::NoHaikuGenerated)?;
		draft.haiku.lines[number - 1] = line;
		draft.states[number - 1] = state;
		Ok(&draft.haiku)
	}

	fn line(&mut self, target_syls: usize, seed: &LineState) -> Result<(Vec<String>, LineState)> {
		let generator = LineGenerator::new(&self.corpus, &self.index, &self.counter, &self.config);
		generator.generate(&mut self.rng, target_syls, seed)
	}
}
