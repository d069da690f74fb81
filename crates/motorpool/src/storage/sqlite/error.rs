//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to the core
//! `RepositoryError` taxonomy. Primary-key violations become `DuplicateId`,
//! unreachable databases become `Unavailable`, and codec failures smuggled
//! through rusqlite's conversion channel become `MalformedRecord`.

use motorpool_core::codec::CodecError;
use motorpool_core::storage::RepositoryError;

fn map_rusqlite_error(err: &rusqlite::Error, id: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::DuplicateId { id: id.to_string() }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::Unavailable(format!("cannot open database: {err}"))
        }

        // A stored row that no longer decodes into a vehicle.
        rusqlite::Error::FromSqlConversionFailure(_, _, source)
            if source.downcast_ref::<CodecError>().is_some() =>
        {
            RepositoryError::MalformedRecord(source.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error, attributing constraint failures to `id`.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, id: &str) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, id),
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::Unavailable("connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
