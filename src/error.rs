//! Error types for the Glaive library.
//!
//! All errors are represented by the [`GlaiveError`] enum. Client-input
//! failures (a malformed modifier specification, a modifier attached to a bulk
//! query, an out-of-range argument) are kept apart from internal failures so
//! that callers can map them to an "invalid argument" response.
//!
//! # Examples
//!
//! ```
//! use glaive::error::{ErrorCategory, GlaiveError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GlaiveError::invalid_modifier_spec("'add_to_score' must not be empty"))
//! }
//!
//! let err = example_operation().unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::InvalidArgument);
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Glaive operations.
#[derive(Error, Debug)]
pub enum GlaiveError {
    /// I/O errors (reading modifier or hit files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The score modifier specification failed validation.
    #[error("Invalid score modifiers: {0}")]
    InvalidModifierSpec(String),

    /// A score modifier specification accompanied a bulk query.
    #[error("Unsupported in bulk search: {0}")]
    UnsupportedInBulkContext(String),

    /// Invalid request argument (limit out of range, bad document, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown index or other missing resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failure reported by the retrieval engine
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with GlaiveError.
pub type Result<T> = std::result::Result<T, GlaiveError>;

/// Client-facing classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something invalid and can fix the request.
    InvalidArgument,
    /// The caller referenced something that does not exist.
    NotFound,
    /// Anything else.
    Internal,
}

impl GlaiveError {
    /// Create a new invalid modifier specification error.
    pub fn invalid_modifier_spec<S: Into<String>>(msg: S) -> Self {
        GlaiveError::InvalidModifierSpec(msg.into())
    }

    /// Create a new bulk-context error.
    pub fn unsupported_in_bulk<S: Into<String>>(msg: S) -> Self {
        GlaiveError::UnsupportedInBulkContext(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        GlaiveError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        GlaiveError::NotFound(msg.into())
    }

    /// Create a new retrieval error.
    pub fn retrieval<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Retrieval(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Other(msg.into())
    }

    /// Classify the error for the request API.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GlaiveError::InvalidModifierSpec(_)
            | GlaiveError::UnsupportedInBulkContext(_)
            | GlaiveError::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            GlaiveError::NotFound(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }

    /// Whether the caller can recover by correcting the request.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::InvalidArgument
    }
}
