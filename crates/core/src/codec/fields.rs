//! Field-level encoding and decoding of vehicle records.
//!
//! Pure functions and types, testable without any backend. Two decode
//! paths: `decode_record` is for persisted data and requires the
//! identity fields, while `decode_params` is for request parameters and
//! additionally requires non-empty brand/model. Both fall back to the
//! documented per-variant defaults for absent variant fields.

use std::collections::BTreeMap;

use crate::vehicle::{Vehicle, VehicleKind};

use super::error::CodecError;

/// Default door count for cars decoded from partial input.
pub const DEFAULT_DOORS: i64 = 4;
/// Default fuel type for cars decoded from partial input.
pub const DEFAULT_FUEL: &str = "Petrol";
/// Default category for bikes decoded from partial input.
pub const DEFAULT_BIKE_CATEGORY: &str = "Cruiser";
/// Default category for motorcycles decoded from partial input.
pub const DEFAULT_MOTORCYCLE_CATEGORY: &str = "Sports";
/// Default engine displacement for motorcycles decoded from partial input.
pub const DEFAULT_ENGINE_CC: i64 = 500;

/// A vehicle flattened to one row of the tabular layout.
///
/// Every possible column is present; columns that do not apply to the
/// record's variant are `None` and stored as SQL NULL by the tabular
/// backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    pub id: String,
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

impl FlatRecord {
    /// Flattens a vehicle into the tabular layout.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        let mut record = Self {
            id: vehicle.id.clone(),
            tag: vehicle.kind.tag().to_string(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            doors: None,
            fuel: None,
            sidecar: None,
            category: None,
            payload: None,
            trailer: None,
            cc: None,
        };

        match &vehicle.kind {
            VehicleKind::Car { doors, fuel } => {
                record.doors = Some(*doors);
                record.fuel = Some(fuel.clone());
            }
            VehicleKind::Bike { sidecar, category } => {
                record.sidecar = Some(*sidecar);
                record.category = Some(category.clone());
            }
            VehicleKind::Truck { payload_kg, trailer } => {
                record.payload = Some(*payload_kg);
                record.trailer = Some(*trailer);
            }
            VehicleKind::Motorcycle { engine_cc, category } => {
                record.cc = Some(*engine_cc);
                record.category = Some(category.clone());
            }
        }

        record
    }

    /// Rebuilds a vehicle from the tabular layout.
    ///
    /// The discriminator selects which columns are read; absent variant
    /// columns fall back to the documented defaults. Unknown discriminators
    /// are rejected.
    pub fn into_vehicle(self) -> Result<Vehicle, CodecError> {
        let kind = match self.tag.to_lowercase().as_str() {
            "car" => VehicleKind::Car {
                doors: self.doors.unwrap_or(DEFAULT_DOORS),
                fuel: self.fuel.unwrap_or_else(|| DEFAULT_FUEL.to_string()),
            },
            "bike" => VehicleKind::Bike {
                sidecar: self.sidecar.unwrap_or(false),
                category: self
                    .category
                    .unwrap_or_else(|| DEFAULT_BIKE_CATEGORY.to_string()),
            },
            "truck" => VehicleKind::Truck {
                payload_kg: self.payload.unwrap_or(0.0),
                trailer: self.trailer.unwrap_or(false),
            },
            "motorcycle" => VehicleKind::Motorcycle {
                engine_cc: self.cc.unwrap_or(DEFAULT_ENGINE_CC),
                category: self
                    .category
                    .unwrap_or_else(|| DEFAULT_MOTORCYCLE_CATEGORY.to_string()),
            },
            _ => return Err(CodecError::UnknownVariant(self.tag)),
        };

        Ok(Vehicle::new(self.brand, self.model, self.year, kind).with_id(self.id))
    }
}

/// Decodes a persisted record from a raw string map.
///
/// `id`, `type`, `brand`, `model` and `year` must be present and parseable;
/// variant fields fall back to the documented defaults. Used by the snapshot
/// loader, where a failure means the record is skipped, not the whole load.
pub fn decode_record(map: &BTreeMap<String, String>) -> Result<Vehicle, CodecError> {
    let id = require(map, "id")?;
    let tag = require(map, "type")?;
    let brand = require(map, "brand")?;
    let model = require(map, "model")?;
    let year = parse_i32(require(map, "year")?, "year")?;

    let kind = decode_kind(tag, map)?;

    Ok(Vehicle::new(brand, model, year, kind).with_id(id))
}

/// Decodes a vehicle from untyped request parameters.
///
/// `type` must name a known variant, `brand` and `model` must be present
/// and non-empty, and `year` must parse; variant fields fall back to the
/// documented defaults. A caller-supplied `id` preserves identity on update
/// paths; otherwise a fresh id is minted.
pub fn decode_params(
    params: &BTreeMap<String, String>,
    id: Option<&str>,
) -> Result<Vehicle, CodecError> {
    let tag = require(params, "type")?;
    let brand = require_non_empty(params, "brand")?;
    let model = require_non_empty(params, "model")?;
    let year = parse_i32(require(params, "year")?, "year")?;

    let kind = decode_kind(tag, params)?;

    let vehicle = Vehicle::new(brand, model, year, kind);
    Ok(match id {
        Some(id) => vehicle.with_id(id),
        None => vehicle,
    })
}

/// Dispatches on the discriminator and reads the variant fields.
fn decode_kind(tag: &str, map: &BTreeMap<String, String>) -> Result<VehicleKind, CodecError> {
    match tag.trim().to_lowercase().as_str() {
        "car" => Ok(VehicleKind::Car {
            doors: parse_i64_or(map, "doors", DEFAULT_DOORS)?,
            fuel: string_or(map, "fuel", DEFAULT_FUEL),
        }),
        "bike" => Ok(VehicleKind::Bike {
            sidecar: parse_bool_or(map, "sidecar", false),
            category: string_or(map, "category", DEFAULT_BIKE_CATEGORY),
        }),
        "truck" => Ok(VehicleKind::Truck {
            payload_kg: parse_f64_or(map, "payload", 0.0)?,
            trailer: parse_bool_or(map, "trailer", false),
        }),
        "motorcycle" => Ok(VehicleKind::Motorcycle {
            engine_cc: parse_i64_or(map, "cc", DEFAULT_ENGINE_CC)?,
            category: string_or(map, "category", DEFAULT_MOTORCYCLE_CATEGORY),
        }),
        _ => Err(CodecError::UnknownVariant(tag.trim().to_string())),
    }
}

fn require<'a>(map: &'a BTreeMap<String, String>, field: &'static str) -> Result<&'a str, CodecError> {
    map.get(field)
        .map(String::as_str)
        .ok_or(CodecError::MissingField(field))
}

fn require_non_empty<'a>(
    map: &'a BTreeMap<String, String>,
    field: &'static str,
) -> Result<&'a str, CodecError> {
    let value = require(map, field)?;
    if value.trim().is_empty() {
        return Err(CodecError::MissingField(field));
    }
    Ok(value)
}

fn parse_i32(value: &str, field: &'static str) -> Result<i32, CodecError> {
    value.trim().parse().map_err(|_| CodecError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_i64_or(
    map: &BTreeMap<String, String>,
    field: &'static str,
    default: i64,
) -> Result<i64, CodecError> {
    match map.get(field) {
        Some(value) => value.trim().parse().map_err(|_| CodecError::InvalidValue {
            field,
            value: value.clone(),
        }),
        None => Ok(default),
    }
}

fn parse_f64_or(
    map: &BTreeMap<String, String>,
    field: &'static str,
    default: f64,
) -> Result<f64, CodecError> {
    match map.get(field) {
        Some(value) => value.trim().parse().map_err(|_| CodecError::InvalidValue {
            field,
            value: value.clone(),
        }),
        None => Ok(default),
    }
}

/// Anything other than "true" (any case) reads as false, like the original
/// request format.
fn parse_bool_or(map: &BTreeMap<String, String>, field: &str, default: bool) -> bool {
    match map.get(field) {
        Some(value) => value.trim().eq_ignore_ascii_case("true"),
        None => default,
    }
}

fn string_or(map: &BTreeMap<String, String>, field: &str, default: &str) -> String {
    map.get(field)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flat_record_round_trip_every_variant() {
        let vehicles = vec![
            Vehicle::new(
                "Toyota",
                "Camry",
                2021,
                VehicleKind::Car {
                    doors: 4,
                    fuel: "Petrol".to_string(),
                },
            ),
            Vehicle::new(
                "Honda",
                "CB500F",
                2020,
                VehicleKind::Bike {
                    sidecar: true,
                    category: "Sports".to_string(),
                },
            ),
            Vehicle::new(
                "Ford",
                "F-150",
                2019,
                VehicleKind::Truck {
                    payload_kg: 1500.5,
                    trailer: true,
                },
            ),
            Vehicle::new(
                "Yamaha",
                "R1",
                2022,
                VehicleKind::Motorcycle {
                    engine_cc: 1000,
                    category: "Sports".to_string(),
                },
            ),
        ];

        for vehicle in vehicles {
            let record = FlatRecord::from_vehicle(&vehicle);
            assert_eq!(record.tag, vehicle.kind.tag());
            let decoded = record.into_vehicle().unwrap();
            assert_eq!(decoded, vehicle);
        }
    }

    #[test]
    fn test_flat_record_leaves_foreign_columns_absent() {
        let car = Vehicle::new(
            "Toyota",
            "Camry",
            2021,
            VehicleKind::Car {
                doors: 4,
                fuel: "Petrol".to_string(),
            },
        );
        let record = FlatRecord::from_vehicle(&car);

        assert_eq!(record.doors, Some(4));
        assert_eq!(record.fuel.as_deref(), Some("Petrol"));
        assert_eq!(record.sidecar, None);
        assert_eq!(record.category, None);
        assert_eq!(record.payload, None);
        assert_eq!(record.trailer, None);
        assert_eq!(record.cc, None);
    }

    #[test]
    fn test_flat_record_rejects_unknown_tag() {
        let mut record = FlatRecord::from_vehicle(&Vehicle::new(
            "Nimbus",
            "2000",
            1999,
            VehicleKind::Bike {
                sidecar: false,
                category: "Cruiser".to_string(),
            },
        ));
        record.tag = "glider".to_string();

        assert_eq!(
            record.into_vehicle(),
            Err(CodecError::UnknownVariant("glider".to_string()))
        );
    }

    #[test]
    fn test_decode_record_applies_variant_defaults() {
        let decoded = decode_record(&map(&[
            ("id", "v-1"),
            ("type", "car"),
            ("brand", "Toyota"),
            ("model", "Camry"),
            ("year", "2021"),
        ]))
        .unwrap();

        assert_eq!(decoded.id, "v-1");
        assert_eq!(
            decoded.kind,
            VehicleKind::Car {
                doors: DEFAULT_DOORS,
                fuel: DEFAULT_FUEL.to_string(),
            }
        );
    }

    #[test]
    fn test_decode_record_requires_identity_fields() {
        let missing_year = decode_record(&map(&[
            ("id", "v-1"),
            ("type", "car"),
            ("brand", "Toyota"),
            ("model", "Camry"),
        ]));
        assert_eq!(missing_year, Err(CodecError::MissingField("year")));

        let missing_id = decode_record(&map(&[
            ("type", "car"),
            ("brand", "Toyota"),
            ("model", "Camry"),
            ("year", "2021"),
        ]));
        assert_eq!(missing_id, Err(CodecError::MissingField("id")));
    }

    #[test]
    fn test_decode_record_rejects_unknown_discriminator() {
        let decoded = decode_record(&map(&[
            ("id", "v-1"),
            ("type", "glider"),
            ("brand", "Nimbus"),
            ("model", "2000"),
            ("year", "1999"),
        ]));
        assert_eq!(decoded, Err(CodecError::UnknownVariant("glider".to_string())));
    }

    #[test]
    fn test_decode_record_rejects_type_mismatch() {
        let decoded = decode_record(&map(&[
            ("id", "v-1"),
            ("type", "car"),
            ("brand", "Toyota"),
            ("model", "Camry"),
            ("year", "2021"),
            ("doors", "many"),
        ]));
        assert_eq!(
            decoded,
            Err(CodecError::InvalidValue {
                field: "doors",
                value: "many".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_params_mints_id_when_absent() {
        let params = map(&[
            ("type", "motorcycle"),
            ("brand", "Yamaha"),
            ("model", "R1"),
            ("year", "2022"),
            ("cc", "1000"),
        ]);

        let a = decode_params(&params, None).unwrap();
        let b = decode_params(&params, None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(
            a.kind,
            VehicleKind::Motorcycle {
                engine_cc: 1000,
                category: DEFAULT_MOTORCYCLE_CATEGORY.to_string(),
            }
        );
    }

    #[test]
    fn test_decode_params_injects_caller_id() {
        let params = map(&[
            ("type", "truck"),
            ("brand", "Ford"),
            ("model", "F-150"),
            ("year", "2019"),
        ]);

        let decoded = decode_params(&params, Some("t-42")).unwrap();
        assert_eq!(decoded.id, "t-42");
        assert_eq!(
            decoded.kind,
            VehicleKind::Truck {
                payload_kg: 0.0,
                trailer: false,
            }
        );
    }

    #[test]
    fn test_decode_params_is_case_insensitive_on_type() {
        let params = map(&[
            ("type", "BIKE"),
            ("brand", "Honda"),
            ("model", "CB500F"),
            ("year", "2020"),
            ("sidecar", "TRUE"),
        ]);

        let decoded = decode_params(&params, None).unwrap();
        assert_eq!(
            decoded.kind,
            VehicleKind::Bike {
                sidecar: true,
                category: DEFAULT_BIKE_CATEGORY.to_string(),
            }
        );
    }

    #[test]
    fn test_decode_params_requires_non_empty_brand_and_model() {
        let blank_brand = decode_params(
            &map(&[
                ("type", "car"),
                ("brand", "  "),
                ("model", "Camry"),
                ("year", "2021"),
            ]),
            None,
        );
        assert_eq!(blank_brand, Err(CodecError::MissingField("brand")));

        let no_model = decode_params(
            &map(&[("type", "car"), ("brand", "Toyota"), ("year", "2021")]),
            None,
        );
        assert_eq!(no_model, Err(CodecError::MissingField("model")));
    }

    #[test]
    fn test_decode_params_rejects_unparseable_year() {
        let decoded = decode_params(
            &map(&[
                ("type", "car"),
                ("brand", "Toyota"),
                ("model", "Camry"),
                ("year", "soon"),
            ]),
            None,
        );
        assert_eq!(
            decoded,
            Err(CodecError::InvalidValue {
                field: "year",
                value: "soon".to_string(),
            })
        );
    }

    #[test]
    fn test_non_true_bools_read_as_false() {
        let params = map(&[
            ("type", "bike"),
            ("brand", "Honda"),
            ("model", "CB500F"),
            ("year", "2020"),
            ("sidecar", "yes"),
        ]);

        let decoded = decode_params(&params, None).unwrap();
        assert_eq!(
            decoded.kind,
            VehicleKind::Bike {
                sidecar: false,
                category: DEFAULT_BIKE_CATEGORY.to_string(),
            }
        );
    }
}
