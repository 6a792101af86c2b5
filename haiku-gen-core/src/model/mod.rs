//! Top-level module for the haiku generation system.
//!
//! This module provides a constrained word Markov chain, including:
//! - Fixed-order word n-gram models (`NGramModel`)
//! - Order-1 and order-2 transition maps (`TransitionIndex`)
//! - Syllable-budgeted line generation (`LineGenerator`)
//! - Three-line haiku assembly and regeneration (`HaikuAssembler`)
//! - Generation bounds (`GenerationConfig`)

/// High-level interface chaining three lines into a haiku.
///
/// Exposes full generation and independent regeneration of lines 2 and 3.
pub mod assembler;

/// Generation bounds and random seed, loadable from JSON.
pub mod generation_config;

/// Single line generation with an exact syllable count.
pub mod line_generator;

/// Fixed-order word n-gram model (`n >= 2`).
///
/// Handles token ingestion and prefix lookup.
pub mod ngram_model;

/// Order-1 and order-2 transition maps built from a corpus.
pub mod transition_index;

/// Internal representation of a single n-gram state (prefix).
///
/// Stores the observed successors of a prefix and filters them by
/// syllable budget.
pub mod state;
