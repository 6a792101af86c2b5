//! Haiku generation library.
//!
//! This crate builds English haiku (5-7-5 syllables) from a training corpus:
//! - Corpus loading and whitespace tokenization
//! - Syllable counting from the CMU Pronouncing Dictionary and an override table
//! - Order-1 and order-2 word Markov chains with frequency-weighted sampling
//! - Line generation under an exact syllable budget
//! - Haiku assembly with line 2 / line 3 regeneration
//!
//! ```no_run
//! use haiku_gen_core::{Corpus, GenerationConfig, HaikuAssembler, SyllableOracle};
//!
//! # fn main() -> Result<(), haiku_gen_core::HaikuError> {
//! let corpus = Corpus::load("data/train.txt")?;
//! let oracle = SyllableOracle::load("data/cmudict.dict", Some("data/missing_words.json"))?;
//! let mut assembler = HaikuAssembler::new(corpus, oracle, GenerationConfig::default())?;
//! println!("{}", assembler.generate()?);
//! # Ok(())
//! # }
//! ```

/// Training corpus (ordered raw tokens).
pub mod corpus;

/// Crate error type.
pub mod error;

/// Transition maps, line generation and haiku assembly.
pub mod model;

/// Syllable counting.
pub mod syllables;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use corpus::Corpus;
pub use error::HaikuError;
pub use model::assembler::{HAIKU_TARGETS, Haiku, HaikuAssembler};
pub use model::generation_config::GenerationConfig;
pub use model::line_generator::{LineGenerator, LineState};
pub use model::transition_index::TransitionIndex;
pub use syllables::{PronunciationTable, SyllableCounter, SyllableOracle};
