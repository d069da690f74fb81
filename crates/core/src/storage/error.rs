use thiserror::Error;

use crate::codec::CodecError;

/// Errors surfaced by repository operations.
///
/// There is no "not found" variant: lookups return `Option`/`bool`
/// results and never error on a missing id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("vehicle already exists: {id}")]
    DuplicateId { id: String },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl From<CodecError> for RepositoryError {
    fn from(error: CodecError) -> Self {
        RepositoryError::MalformedRecord(error.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
