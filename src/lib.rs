//! # Glaive
//!
//! Score modifiers for search results.
//!
//! ## Features
//!
//! - Strict validation of `multiply_score_by` / `add_to_score` specifications
//! - Deterministic score combination against the full stored document
//! - A search pipeline that rescores, ranks and projects retriever hits
//! - Parallel rescoring for large hit lists
//! - A command line tool for validating modifiers and rescoring hit files

pub mod cli;
pub mod document;
pub mod error;
pub mod modifier;
pub mod search;

pub mod prelude {
    pub use crate::document::{Document, FieldValue};
    pub use crate::error::{GlaiveError, Result};
    pub use crate::modifier::{ModifierConfig, ModifierSpec, ScoreModifiers, Term};
    pub use crate::search::{SearchConfig, SearchEngine, SearchQuery};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
