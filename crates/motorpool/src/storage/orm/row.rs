//! Row mapping between the `vehicles` table and the core codec.

use motorpool_core::codec::{CodecError, FlatRecord};
use motorpool_core::vehicle::Vehicle;

/// One row of the single-table layout, as sqlx decodes it.
#[derive(Debug, sqlx::FromRow)]
pub struct VehicleRow {
    pub id: String,
    #[sqlx(rename = "type")]
    pub tag: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub doors: Option<i64>,
    pub fuel: Option<String>,
    pub sidecar: Option<bool>,
    pub category: Option<String>,
    pub payload: Option<f64>,
    pub trailer: Option<bool>,
    pub cc: Option<i64>,
}

impl VehicleRow {
    /// Rebuilds the vehicle; fails on an unknown discriminator.
    pub fn into_vehicle(self) -> Result<Vehicle, CodecError> {
        FlatRecord {
            id: self.id,
            tag: self.tag,
            brand: self.brand,
            model: self.model,
            year: self.year,
            doors: self.doors,
            fuel: self.fuel,
            sidecar: self.sidecar,
            category: self.category,
            payload: self.payload,
            trailer: self.trailer,
            cc: self.cc,
        }
        .into_vehicle()
    }
}
