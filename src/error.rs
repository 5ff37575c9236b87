//! Error types for the outline library.
//!
//! The inference stages themselves never fail: empty input, malformed numerals
//! and missing geometry fall back to neutral defaults. Errors only come from
//! loading input, (de)serializing JSON and validating the output contract.

/// Result type alias for outline library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading documents or emitting outlines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input lines violate the line model (page out of range, non-finite geometry)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Outline document violates the output contract
    #[error("Invalid outline item {index}: {reason}")]
    Validation {
        /// Index of the offending outline item, or `usize::MAX` for document-level keys
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A single document in a batch failed
    #[error("Document '{name}' failed: {source}")]
    Document {
        /// Document name
        name: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Build a document-level validation error (not tied to an outline item).
    pub fn document_level(reason: impl Into<String>) -> Self {
        Error::Validation {
            index: usize::MAX,
            reason: reason.into(),
        }
    }
}
