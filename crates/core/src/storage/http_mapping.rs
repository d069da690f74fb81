//! Pure mapping from repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `DuplicateId` -> 409 (Conflict)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `MalformedRecord` -> 500 (persisted data is bad, a server problem)
/// - `QueryFailed` -> 500 (Internal Server Error)
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::DuplicateId { .. } => 409,
        RepositoryError::Unavailable(_) => 503,
        RepositoryError::MalformedRecord(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
    }
}
