//! Tabular SQLite storage backend.
//!
//! One flat `vehicles` table with a column for every field across all
//! variants; columns that do not apply to a row's variant are NULL. Row
//! mapping goes through the core codec's `FlatRecord`, so the discriminator
//! handling is shared with the snapshot and wire formats.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
