use thiserror::Error;

/// Errors reported by the haiku generation pipeline.
///
/// None of them is fatal: a driving program can report the error and offer
/// another action. The bounded sampling retries inside line generation are
/// the only retries performed by the crate itself.
#[derive(Error, Debug)]
pub enum HaikuError {
	/// A token has no syllable count in the override table nor in the
	/// pronunciation reference.
	#[error("Word not in dictionary: {0}")]
	UnknownWord(String),

	/// A line could not reach its syllable target within the retry bound.
	#[error("Generation exhausted: no {target}-syllable line found after {attempts} attempts")]
	GenerationExhausted { target: usize, attempts: usize },

	/// A regenerate operation was requested before any full haiku.
	#[error("No haiku generated yet")]
	NoHaikuGenerated,

	/// The corpus is too small to produce order-1 and order-2 transitions.
	#[error("Transition model is empty, corpus too small")]
	EmptyModel,

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("Dictionary cache error: {0}")]
	Cache(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, HaikuError>;
