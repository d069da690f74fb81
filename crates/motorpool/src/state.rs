//! Application state with repository-based storage.
//!
//! The state owns one `Arc<dyn VehicleRepository>` chosen at startup from
//! [`Config`]; handlers never learn which backend is behind it. When the
//! active backend also supports whole-list snapshots (the in-memory one),
//! a second handle exposes that capability to the snapshot endpoints.

use std::path::Path;
use std::sync::Arc;

use motorpool_core::storage::{RepositoryError, SnapshotStore, VehicleRepository};

use crate::config::{BackendKind, Config};
use crate::storage::{InMemoryRepository, OrmRepository, SqliteRepository};

/// Shared application state, cloned into each request handler.
#[derive(Clone)]
pub struct AppState {
    /// The active storage backend.
    pub repo: Arc<dyn VehicleRepository>,
    /// Snapshot capability of the active backend, when it has one.
    pub snapshots: Option<Arc<dyn SnapshotStore>>,
    /// Where snapshots are saved and loaded.
    pub snapshot_path: std::path::PathBuf,
}

impl AppState {
    /// Builds the state for the configured backend and runs its `init`.
    ///
    /// Initialization failures are returned to the caller, who may fall
    /// back to a different backend; no fallback happens here.
    pub async fn new(config: &Config) -> Result<Self, RepositoryError> {
        let state = match config.backend {
            BackendKind::Memory => Self::in_memory(&config.snapshot_path),
            BackendKind::Sqlite => {
                let repo = SqliteRepository::new(&config.sqlite_path).await?;
                Self {
                    repo: Arc::new(repo),
                    snapshots: None,
                    snapshot_path: config.snapshot_path.clone(),
                }
            }
            BackendKind::Orm => {
                let repo = OrmRepository::connect(&config.database_url).await?;
                Self {
                    repo: Arc::new(repo),
                    snapshots: None,
                    snapshot_path: config.snapshot_path.clone(),
                }
            }
        };

        state.repo.init().await?;
        tracing::info!(backend = config.backend.name(), "storage backend ready");
        Ok(state)
    }

    /// State over a fresh in-memory backend. Also the caller-level
    /// fallback when a SQL backend fails to initialize.
    pub fn in_memory(snapshot_path: &Path) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        Self {
            repo: repo.clone(),
            snapshots: Some(repo),
            snapshot_path: snapshot_path.to_path_buf(),
        }
    }
}
