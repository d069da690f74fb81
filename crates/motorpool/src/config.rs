use std::{env, path::PathBuf};

/// Which storage backend the service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Ordered in-memory list with snapshot persistence.
    Memory,
    /// Tabular SQLite over rusqlite.
    Sqlite,
    /// Single-table ORM over sqlx.
    Orm,
}

impl BackendKind {
    /// Parses a backend name, ignoring case. Returns `None` for unknown
    /// names so the caller can decide how loudly to complain.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "inmemory" => Some(Self::Memory),
            "sqlite" | "sql" => Some(Self::Sqlite),
            "orm" => Some(Self::Orm),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
            Self::Orm => "orm",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active storage backend (default: memory)
    pub backend: BackendKind,
    /// Path to the tabular SQLite database file (default: "motorpool.db")
    pub sqlite_path: String,
    /// Connection URL for the ORM backend (default: "sqlite:motorpool-orm.db")
    pub database_url: String,
    /// Path the in-memory backend snapshots to (default: "vehicles.json")
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BACKEND` - storage backend: memory | sqlite | orm (default: memory)
    /// - `SQLITE_PATH` - tabular SQLite database path (default: "motorpool.db")
    /// - `DATABASE_URL` - ORM connection URL (default: "sqlite:motorpool-orm.db")
    /// - `SNAPSHOT_PATH` - snapshot file path (default: "vehicles.json")
    pub fn from_env() -> Self {
        let backend = match env::var("BACKEND") {
            Ok(value) => BackendKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!(backend = %value, "unknown BACKEND, using memory");
                BackendKind::Memory
            }),
            Err(_) => BackendKind::Memory,
        };

        Self {
            backend,
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "motorpool.db".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:motorpool-orm.db".to_string()),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("vehicles.json")),
        }
    }
}
