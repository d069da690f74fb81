use std::path::Path;

use async_trait::async_trait;

use crate::vehicle::Vehicle;

use super::Result;

/// Uniform CRUD contract implemented by every storage backend.
///
/// All backends expose identical observable behavior; callers hold an
/// `Arc<dyn VehicleRepository>` and never learn which backend is active.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Idempotent backend preparation (schema creation, connection warm-up,
    /// migrations). A no-op is valid for backends with nothing to prepare.
    async fn init(&self) -> Result<()>;

    /// Inserts a new record. Fails with `DuplicateId` when the id is taken.
    async fn add(&self, vehicle: &Vehicle) -> Result<()>;

    /// Removes the record with the given id. Returns whether a record
    /// existed; a missing id is not an error.
    async fn remove_by_id(&self, id: &str) -> Result<bool>;

    /// Replaces the record whose id matches `vehicle.id` with the given
    /// fully-formed value. Returns false when no such record exists.
    async fn update(&self, vehicle: &Vehicle) -> Result<bool>;

    /// Returns all records: insertion order for the in-memory backend,
    /// stable storage order otherwise.
    async fn get_all(&self) -> Result<Vec<Vehicle>>;

    /// Looks up a record by id.
    async fn get_by_id(&self, id: &str) -> Result<Option<Vehicle>>;

    /// Releases backend resources. Called exactly once at shutdown; the
    /// default is a no-op for backends without a connection factory.
    async fn close(&self) {}
}

/// Whole-list snapshot persistence, implemented only by backends whose
/// state lives in memory.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Serializes the full list to the snapshot format and writes it
    /// atomically to `path`.
    async fn save_snapshot(&self, path: &Path) -> Result<()>;

    /// Clears current state and loads the snapshot at `path`, skipping
    /// records that fail to decode. Returns how many records loaded.
    async fn load_snapshot(&self, path: &Path) -> Result<usize>;
}
