//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The column identifier is empty after trimming.
    #[error("column id must not be empty")]
    EmptyColumnId,

    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// The persisted column order is not a JSON list of column ids.
    #[error("malformed column order payload: {0}")]
    MalformedColumnOrder(String),
}
