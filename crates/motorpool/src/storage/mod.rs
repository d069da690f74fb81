//! Storage backend implementations.
//!
//! Three interchangeable implementations of
//! [`motorpool_core::storage::VehicleRepository`]:
//!
//! - [`inmemory`]: ordered in-memory list with flat-file snapshot
//!   persistence
//! - [`sqlite`]: one flat table with nullable variant columns, mapped by
//!   hand over `rusqlite`/`tokio-rusqlite`
//! - [`orm`]: the same single-table layout behind `sqlx`, with embedded
//!   migrations and per-operation transactions
//!
//! The active backend is chosen at runtime from [`crate::config::Config`];
//! all three expose identical observable behavior, pinned by the shared
//! contract test suite in [`contract`].

pub mod inmemory;
pub mod orm;
pub mod sqlite;

mod samples;

pub use inmemory::InMemoryRepository;
pub use orm::OrmRepository;
pub use sqlite::SqliteRepository;

pub(crate) use samples::sample_vehicles;

#[cfg(test)]
pub(crate) mod contract;
