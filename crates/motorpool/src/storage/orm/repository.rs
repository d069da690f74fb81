//! ORM repository implementation over a sqlx connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use motorpool_core::codec::FlatRecord;
use motorpool_core::storage::{RepositoryError, Result, VehicleRepository};
use motorpool_core::vehicle::Vehicle;

use super::row::VehicleRow;

const INSERT_VEHICLE: &str = r#"
INSERT INTO vehicles (id, type, brand, model, year, doors, fuel, sidecar, category, payload, trailer, cc)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const UPDATE_VEHICLE: &str = r#"
UPDATE vehicles
SET type = ?, brand = ?, model = ?, year = ?, doors = ?, fuel = ?,
    sidecar = ?, category = ?, payload = ?, trailer = ?, cc = ?
WHERE id = ?
"#;

const SELECT_ALL_VEHICLES: &str = r#"
SELECT id, type, brand, model, year, doors, fuel, sidecar, category, payload, trailer, cc
FROM vehicles
ORDER BY rowid
"#;

const SELECT_VEHICLE_BY_ID: &str = r#"
SELECT id, type, brand, model, year, doors, fuel, sidecar, category, payload, trailer, cc
FROM vehicles
WHERE id = ?
"#;

/// Repository backed by a sqlx pool over the single-table layout.
///
/// `connect` only builds the connection factory; `init` runs the embedded
/// migrations. Each mutation opens one transaction, performs exactly one
/// statement and commits; reads go straight through the pool.
pub struct OrmRepository {
    pool: SqlitePool,
}

impl OrmRepository {
    /// Connects to the database at `url`, creating the file if missing.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Connects to an in-memory database. A single connection keeps the
    /// database alive for the pool's lifetime.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Ok(Self { pool })
    }
}

fn map_sqlx_error(err: sqlx::Error, id: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::DuplicateId { id: id.to_string() }
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            RepositoryError::Unavailable(err.to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[async_trait]
impl VehicleRepository for OrmRepository {
    /// Runs migrations before anything else touches the pool. Either step
    /// failing is fatal to this backend.
    async fn init(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("migrations failed: {e}")))
    }

    async fn add(&self, vehicle: &Vehicle) -> Result<()> {
        let record = FlatRecord::from_vehicle(vehicle);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, &vehicle.id))?;

        sqlx::query(INSERT_VEHICLE)
            .bind(&record.id)
            .bind(&record.tag)
            .bind(&record.brand)
            .bind(&record.model)
            .bind(record.year)
            .bind(record.doors)
            .bind(&record.fuel)
            .bind(record.sidecar)
            .bind(&record.category)
            .bind(record.payload)
            .bind(record.trailer)
            .bind(record.cc)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, &vehicle.id))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, &vehicle.id))
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(e, id))?;

        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, id))?;

        tx.commit().await.map_err(|e| map_sqlx_error(e, id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<bool> {
        let record = FlatRecord::from_vehicle(vehicle);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, &vehicle.id))?;

        let result = sqlx::query(UPDATE_VEHICLE)
            .bind(&record.tag)
            .bind(&record.brand)
            .bind(&record.model)
            .bind(record.year)
            .bind(record.doors)
            .bind(&record.fuel)
            .bind(record.sidecar)
            .bind(&record.category)
            .bind(record.payload)
            .bind(record.trailer)
            .bind(record.cc)
            .bind(&record.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, &vehicle.id))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, &vehicle.id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_all(&self) -> Result<Vec<Vehicle>> {
        let rows: Vec<VehicleRow> = sqlx::query_as(SELECT_ALL_VEHICLES)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ""))?;

        rows.into_iter()
            .map(|row| row.into_vehicle().map_err(RepositoryError::from))
            .collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
        let row: Option<VehicleRow> = sqlx::query_as(SELECT_VEHICLE_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, id))?;

        row.map(|r| r.into_vehicle().map_err(RepositoryError::from))
            .transpose()
    }

    /// Releases the connection factory. Call exactly once at shutdown.
    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;

    async fn fresh_repo() -> OrmRepository {
        let repo = OrmRepository::connect_in_memory().await.unwrap();
        repo.init().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_contract_round_trips_every_variant() {
        contract::round_trips_every_variant(&fresh_repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_remove_semantics() {
        contract::remove_semantics(&fresh_repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_update_replaces_in_full() {
        contract::update_replaces_in_full(&fresh_repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_rejects_duplicate_ids() {
        contract::rejects_duplicate_ids(&fresh_repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_update_on_missing_id() {
        contract::update_on_missing_id_returns_false(&fresh_repo().await).await;
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let repo = fresh_repo().await;
        repo.init().await.unwrap();

        repo.add(&contract::sample_fleet()[0]).await.unwrap();
        repo.init().await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_migrations_create_the_vehicles_table() {
        let repo = fresh_repo().await;
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(&repo.pool)
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(names.contains(&"vehicles"));
    }

    #[tokio::test]
    async fn test_unknown_discriminator_row_surfaces_malformed_record() {
        let repo = fresh_repo().await;
        sqlx::query(
            "INSERT INTO vehicles (id, type, brand, model, year) VALUES ('x-1', 'glider', 'Nimbus', '2000', 1999)",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let result = repo.get_by_id("x-1").await;
        assert!(matches!(result, Err(RepositoryError::MalformedRecord(_))));
    }

    #[tokio::test]
    async fn test_close_releases_the_pool() {
        let repo = fresh_repo().await;
        repo.close().await;
        assert!(repo.pool.is_closed());
    }
}
