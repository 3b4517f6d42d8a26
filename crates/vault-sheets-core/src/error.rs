//! Error types for vault-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vault-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Column name already exists in the table
    #[error("Column name already exists: {0}")]
    DuplicateColumn(String),

    /// Column not found by name
    #[error("Column not found: {0}")]
    UnknownColumn(String),

    /// Column name is empty or too long
    #[error("Invalid column name: {0}")]
    InvalidColumnName(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (count: {1})")]
    RowOutOfBounds(usize, usize),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
