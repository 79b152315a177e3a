//! Error types for record store operations

use thiserror::Error;

/// Error returned by a [`SubmissionStore`](crate::SubmissionStore) implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store's uniqueness constraint on `name` rejected the insert
    #[error("Name already taken: {name}")]
    Conflict { name: String },

    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether this error is a uniqueness violation on the submission name
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
