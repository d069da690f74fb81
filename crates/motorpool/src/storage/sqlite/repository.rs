//! Tabular SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use motorpool_core::codec::FlatRecord;
use motorpool_core::storage::{RepositoryError, Result, VehicleRepository};
use motorpool_core::vehicle::Vehicle;

use crate::storage::sample_vehicles;

use super::conversions::row_to_vehicle;
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-backed repository with one flat table for all vehicle variants.
///
/// Operations are serialized through a single connection actor; every
/// statement is scoped inside its closure so resources are released on all
/// exit paths.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database. Call
    /// [`VehicleRepository::init`] before first use.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Opens an in-memory database, lost when the connection drops.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    async fn count(&self) -> Result<i64> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::COUNT_VEHICLES, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ""))
    }

    /// Seeds one example record per variant when the table is empty.
    async fn seed_if_empty(&self) -> Result<()> {
        if self.count().await? > 0 {
            return Ok(());
        }
        for vehicle in sample_vehicles() {
            self.add(&vehicle).await?;
        }
        tracing::info!("seeded sample vehicles into empty catalog");
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for SqliteRepository {
    async fn init(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::CREATE_TABLE).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ""))?;

        // Seeding is a dev convenience; its failure never aborts init.
        if let Err(error) = self.seed_if_empty().await {
            tracing::warn!(%error, "failed to seed sample vehicles");
        }

        Ok(())
    }

    async fn add(&self, vehicle: &Vehicle) -> Result<()> {
        let record = FlatRecord::from_vehicle(vehicle);
        let id = vehicle.id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_VEHICLE,
                    rusqlite::params![
                        record.id,
                        record.tag,
                        record.brand,
                        record.model,
                        record.year,
                        record.doors,
                        record.fuel,
                        record.sidecar,
                        record.category,
                        record.payload,
                        record.trailer,
                        record.cc
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &id))
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool> {
        let id_param = id.to_string();
        let id_err = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_VEHICLE, [&id_param])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &id_err))
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<bool> {
        let record = FlatRecord::from_vehicle(vehicle);
        let id = vehicle.id.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_VEHICLE,
                        rusqlite::params![
                            record.id,
                            record.tag,
                            record.brand,
                            record.model,
                            record.year,
                            record.doors,
                            record.fuel,
                            record.sidecar,
                            record.category,
                            record.payload,
                            record.trailer,
                            record.cc
                        ],
                    )
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &id))
    }

    async fn get_all(&self) -> Result<Vec<Vehicle>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_VEHICLES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_vehicle).map_err(wrap_err)?;

                let mut vehicles = Vec::new();
                for row_result in rows {
                    vehicles.push(row_result.map_err(wrap_err)?);
                }
                Ok(vehicles)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ""))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
        let id_param = id.to_string();
        let id_err = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_VEHICLE_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_param], row_to_vehicle) {
                    Ok(vehicle) => Ok(Some(vehicle)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &id_err))
    }
}
