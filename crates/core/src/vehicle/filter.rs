//! Pure filtering helpers used by the dispatcher's list endpoint.

use super::types::Vehicle;

/// Returns true if the vehicle's brand contains `query`, ignoring case.
///
/// A blank query matches everything.
pub fn brand_contains(vehicle: &Vehicle, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    vehicle.brand.to_lowercase().contains(&q)
}

/// Filters vehicles by brand (case-insensitive substring) and discriminator
/// tag (case-insensitive exact match). Blank or absent filters are no-ops.
pub fn filter_vehicles(
    vehicles: Vec<Vehicle>,
    brand: Option<&str>,
    tag: Option<&str>,
) -> Vec<Vehicle> {
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());

    vehicles
        .into_iter()
        .filter(|v| brand.is_none_or(|q| brand_contains(v, q)))
        .filter(|v| tag.is_none_or(|t| v.kind.matches_tag(t)))
        .collect()
}
