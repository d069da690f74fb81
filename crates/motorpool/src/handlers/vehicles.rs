//! Vehicle CRUD handlers.
//!
//! The dispatcher decodes untyped request parameters through the core
//! codec, validates at the boundary, and forwards to whichever backend the
//! state carries. Validation failures are client errors; storage failures
//! surface as server errors through [`AppError`].

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;

use motorpool_core::codec::decode_params;
use motorpool_core::vehicle::{filter_vehicles, Vehicle};

use crate::{handlers::AppError, state::AppState};

/// Path segments that act as routing verbs and must never be read as ids.
const RESERVED_SEGMENTS: [&str; 4] = ["add", "delete", "update", "snapshot"];

/// Expected manufacture year range, enforced at the boundary only.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1886..=2100;

fn reject_reserved(id: &str) -> Result<(), AppError> {
    if RESERVED_SEGMENTS.contains(&id) {
        return Err(AppError::not_found(format!(
            "'{id}' is a routing verb, not a vehicle id"
        )));
    }
    Ok(())
}

fn validate_year(vehicle: &Vehicle) -> Result<(), AppError> {
    if !YEAR_RANGE.contains(&vehicle.year) {
        return Err(AppError::bad_request(format!(
            "year {} out of range {}..={}",
            vehicle.year,
            YEAR_RANGE.start(),
            YEAR_RANGE.end()
        )));
    }
    Ok(())
}

/// Query parameters for listing vehicles.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring match on the brand.
    pub brand: Option<String>,
    /// Case-insensitive exact match on the discriminator tag.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// List vehicles with optional brand/type filters (GET /api/vehicles).
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state.repo.get_all().await?;
    Ok(Json(filter_vehicles(
        vehicles,
        query.brand.as_deref(),
        query.kind.as_deref(),
    )))
}

/// Get a single vehicle by id (GET /api/vehicles/{id}).
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    reject_reserved(&id)?;

    match state.repo.get_by_id(&id).await? {
        Some(vehicle) => Ok(Json(vehicle)),
        None => Err(AppError::not_found(format!("no vehicle with id {id}"))),
    }
}

/// Create a vehicle from form parameters (POST /api/vehicles/add).
///
/// The id is always minted server-side; the response carries it back.
pub async fn create_vehicle(
    State(state): State<AppState>,
    Form(params): Form<BTreeMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle =
        decode_params(&params, None).map_err(|e| AppError::bad_request(e.to_string()))?;
    validate_year(&vehicle)?;

    state.repo.add(&vehicle).await?;
    tracing::info!(vehicle_id = %vehicle.id, vehicle = %vehicle.describe(), "added vehicle");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "ok": true, "id": vehicle.id })),
    ))
}

/// Update a vehicle at the path id (PUT /api/vehicles/{id}).
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(params): Form<BTreeMap<String, String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    reject_reserved(&id)?;
    update_impl(&state, &id, &params).await
}

/// Update a vehicle whose id arrives in the parameters
/// (POST /api/vehicles/update).
pub async fn update_vehicle_by_params(
    State(state): State<AppState>,
    Form(params): Form<BTreeMap<String, String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = params
        .get("id")
        .cloned()
        .ok_or_else(|| AppError::bad_request("id missing"))?;
    update_impl(&state, &id, &params).await
}

/// Full-replace update preserving the caller-supplied identity. A missing
/// id is reported as not-found, the same on every backend.
async fn update_impl(
    state: &AppState,
    id: &str,
    params: &BTreeMap<String, String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let vehicle =
        decode_params(params, Some(id)).map_err(|e| AppError::bad_request(e.to_string()))?;
    validate_year(&vehicle)?;

    if state.repo.update(&vehicle).await? {
        tracing::info!(vehicle_id = %id, "updated vehicle");
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::not_found(format!("no vehicle with id {id}")))
    }
}

/// Delete a vehicle at the path id (DELETE /api/vehicles/{id}).
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    reject_reserved(&id)?;
    delete_impl(&state, &id).await
}

/// Delete a vehicle whose id arrives in the parameters
/// (POST /api/vehicles/delete).
pub async fn delete_vehicle_by_params(
    State(state): State<AppState>,
    Form(params): Form<BTreeMap<String, String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = params
        .get("id")
        .cloned()
        .ok_or_else(|| AppError::bad_request("id missing"))?;
    delete_impl(&state, &id).await
}

/// Removal reports presence through the body, never through the status.
async fn delete_impl(state: &AppState, id: &str) -> Result<Json<serde_json::Value>, AppError> {
    let removed = state.repo.remove_by_id(id).await?;
    if removed {
        tracing::info!(vehicle_id = %id, "deleted vehicle");
    }
    Ok(Json(serde_json::json!({ "ok": removed })))
}

/// Persist the catalog to the snapshot file
/// (POST /api/vehicles/snapshot/save).
pub async fn save_snapshot(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(store) = state.snapshots.as_ref() else {
        return Err(AppError::bad_request(
            "active backend does not support snapshots",
        ));
    };

    store.save_snapshot(&state.snapshot_path).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Replace the catalog with the snapshot file's contents
/// (POST /api/vehicles/snapshot/load).
pub async fn load_snapshot(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(store) = state.snapshots.as_ref() else {
        return Err(AppError::bad_request(
            "active backend does not support snapshots",
        ));
    };

    let loaded = store.load_snapshot(&state.snapshot_path).await?;
    Ok(Json(serde_json::json!({ "ok": true, "loaded": loaded })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_segments_are_rejected_as_ids() {
        for segment in RESERVED_SEGMENTS {
            assert!(reject_reserved(segment).is_err(), "{segment} should be reserved");
        }
        assert!(reject_reserved("7f3e2d9a").is_ok());
        // Only exact segment names are reserved.
        assert!(reject_reserved("addendum").is_ok());
    }

    #[test]
    fn test_year_range_bounds() {
        let mut vehicle = Vehicle::new(
            "Benz",
            "Patent-Motorwagen",
            1886,
            motorpool_core::vehicle::VehicleKind::Car {
                doors: 0,
                fuel: "Petrol".to_string(),
            },
        );
        assert!(validate_year(&vehicle).is_ok());

        vehicle.year = 1885;
        assert!(validate_year(&vehicle).is_err());

        vehicle.year = 2100;
        assert!(validate_year(&vehicle).is_ok());

        vehicle.year = 2101;
        assert!(validate_year(&vehicle).is_err());
    }
}
