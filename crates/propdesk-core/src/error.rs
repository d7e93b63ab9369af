//! Error types for collection document handling.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for document parsing and mutation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The stored document could not be parsed as a JSON array.
    #[error("malformed collection document: {0}")]
    MalformedDocument(String),

    /// The requested mutation is not one of add, edit, delete.
    #[error("unknown action: {0}")]
    UnknownAction(String),
}
