//! SQLite row conversion functions.
//!
//! Pure functions between SQLite rows and the core codec's `FlatRecord`,
//! testable without database access.

use motorpool_core::codec::{CodecError, FlatRecord};
use motorpool_core::vehicle::Vehicle;
use rusqlite::Row;

/// Convert a SQLite row to a Vehicle.
///
/// Expected columns: id, type, brand, model, year, doors, fuel, sidecar,
/// category, payload, trailer, cc
pub fn row_to_vehicle(row: &Row) -> rusqlite::Result<Vehicle> {
    let record = FlatRecord {
        id: row.get(0)?,
        tag: row.get(1)?,
        brand: row.get(2)?,
        model: row.get(3)?,
        year: row.get(4)?,
        doors: row.get(5)?,
        fuel: row.get(6)?,
        sidecar: row.get(7)?,
        category: row.get(8)?,
        payload: row.get(9)?,
        trailer: row.get(10)?,
        cc: row.get(11)?,
    };

    record.into_vehicle().map_err(codec_error_to_rusqlite)
}

/// Wraps a codec failure so it travels through rusqlite's error channel and
/// can be recognized again by the backend's error mapper.
fn codec_error_to_rusqlite(error: CodecError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(error))
}
