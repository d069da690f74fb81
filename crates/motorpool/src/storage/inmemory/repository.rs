//! In-memory repository implementation.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use motorpool_core::codec::{parse_snapshot, render_snapshot};
use motorpool_core::storage::{RepositoryError, Result, SnapshotStore, VehicleRepository};
use motorpool_core::vehicle::{brand_contains, Vehicle};

/// In-memory storage backend.
///
/// Holds an ordered `Vec` behind `Arc<RwLock<_>>` so that concurrent
/// callers (HTTP handlers, tests) see add/remove/update as serializable
/// operations. `get_all` returns insertion order; `update` replaces the
/// record at its current position rather than removing and re-appending.
/// State is lost on drop unless persisted through [`SnapshotStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vehicles whose brand contains `query`, ignoring case. A blank query
    /// returns the full list unchanged.
    pub async fn vehicles_by_brand(&self, query: &str) -> Vec<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles
            .iter()
            .filter(|v| brand_contains(v, query))
            .cloned()
            .collect()
    }

    /// Vehicles manufactured in the given year.
    pub async fn vehicles_by_year(&self, year: i32) -> Vec<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles.iter().filter(|v| v.year == year).cloned().collect()
    }

    /// Number of vehicles currently stored.
    pub async fn count(&self) -> usize {
        self.vehicles.read().await.len()
    }

    /// Average top speed across the catalog, or 0.0 when empty.
    pub async fn average_max_speed(&self) -> f64 {
        let vehicles = self.vehicles.read().await;
        if vehicles.is_empty() {
            return 0.0;
        }
        vehicles.iter().map(Vehicle::max_speed).sum::<f64>() / vehicles.len() as f64
    }

    /// The vehicle with the highest top speed, if any.
    pub async fn fastest_vehicle(&self) -> Option<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles
            .iter()
            .max_by(|a, b| a.max_speed().total_cmp(&b.max_speed()))
            .cloned()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryRepository {
    /// Nothing to prepare for the in-memory backend.
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn add(&self, vehicle: &Vehicle) -> Result<()> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.iter().any(|v| v.id == vehicle.id) {
            return Err(RepositoryError::DuplicateId {
                id: vehicle.id.clone(),
            });
        }
        vehicles.push(vehicle.clone());
        Ok(())
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        Ok(vehicles.len() != before)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<bool> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(slot) => {
                *slot = vehicle.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_all(&self) -> Result<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }
}

#[async_trait]
impl SnapshotStore for InMemoryRepository {
    async fn save_snapshot(&self, path: &Path) -> Result<()> {
        let text = {
            let vehicles = self.vehicles.read().await;
            render_snapshot(&vehicles)
        };

        // Write the whole file to a sibling temp path, then rename over the
        // target so readers never observe a partial snapshot.
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("snapshot write failed: {e}")))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("snapshot rename failed: {e}")))?;

        tracing::info!(path = %path.display(), "saved snapshot");
        Ok(())
    }

    async fn load_snapshot(&self, path: &Path) -> Result<usize> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no snapshot file, keeping current state");
                return Ok(0);
            }
            Err(e) => {
                return Err(RepositoryError::QueryFailed(format!(
                    "snapshot read failed: {e}"
                )))
            }
        };

        let loaded = parse_snapshot(&text);
        let count = loaded.len();

        let mut vehicles = self.vehicles.write().await;
        *vehicles = loaded;

        tracing::info!(path = %path.display(), count, "loaded snapshot");
        Ok(count)
    }
}

fn temp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
