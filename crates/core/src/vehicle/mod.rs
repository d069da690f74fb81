mod filter;
mod types;

pub use filter::{brand_contains, filter_vehicles};
pub use types::{Vehicle, VehicleKind};
