use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The variant-specific half of a vehicle.
///
/// The `type` tag is the discriminator stored alongside every persisted
/// record; adding a new vehicle variant means adding one arm here and one
/// arm to each exhaustive match over this enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VehicleKind {
    Car {
        doors: i64,
        /// "Petrol", "Diesel", "Electric" or "Hybrid".
        fuel: String,
    },
    Bike {
        sidecar: bool,
        /// "Cruiser", "Sports" or "Touring".
        category: String,
    },
    Truck {
        #[serde(rename = "payload")]
        payload_kg: f64,
        trailer: bool,
    },
    Motorcycle {
        #[serde(rename = "cc")]
        engine_cc: i64,
        category: String,
    },
}

impl VehicleKind {
    /// Returns the discriminator tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            VehicleKind::Car { .. } => "Car",
            VehicleKind::Bike { .. } => "Bike",
            VehicleKind::Truck { .. } => "Truck",
            VehicleKind::Motorcycle { .. } => "Motorcycle",
        }
    }

    /// Returns true if `tag` names this variant, ignoring case.
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }
}

/// A vehicle in the catalog.
///
/// `id` is the sole identity key: it is minted at creation, survives
/// updates unchanged, and is what remove/update/get-by-id dispatch on.
/// Records are never mutated field-by-field; an update replaces the whole
/// value at an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(flatten)]
    pub kind: VehicleKind,
}

impl Vehicle {
    /// Creates a vehicle with a freshly minted id.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        kind: VehicleKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            brand: brand.into(),
            model: model.into(),
            year,
            kind,
        }
    }

    /// Rebinds this vehicle to an existing identity.
    ///
    /// Used when decoding persisted records and when an update must
    /// preserve the id of the record it replaces.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Top speed in km/h.
    pub fn max_speed(&self) -> f64 {
        match &self.kind {
            VehicleKind::Car { .. } => 250.0,
            VehicleKind::Bike { .. } => 300.0,
            VehicleKind::Truck { .. } => 180.0,
            VehicleKind::Motorcycle { engine_cc, .. } => 220.0 + (*engine_cc as f64 / 100.0),
        }
    }

    /// Message produced when the vehicle starts.
    pub fn start_message(&self) -> String {
        match &self.kind {
            VehicleKind::Car { fuel, .. } => format!("Car engine started with {fuel} fuel"),
            VehicleKind::Bike { .. } => "Bike engine started (throttle up!)".to_string(),
            VehicleKind::Truck { .. } => "Truck engine started".to_string(),
            VehicleKind::Motorcycle { .. } => "Motorcycle engine started".to_string(),
        }
    }

    /// Message produced when the vehicle stops.
    pub fn stop_message(&self) -> String {
        match &self.kind {
            VehicleKind::Car { .. } => "Car engine stopped".to_string(),
            VehicleKind::Bike { .. } => "Bike engine stopped".to_string(),
            VehicleKind::Truck { .. } => "Truck engine stopped".to_string(),
            VehicleKind::Motorcycle { .. } => "Motorcycle engine stopped".to_string(),
        }
    }

    /// One-line display string for logs and listings.
    pub fn describe(&self) -> String {
        let head = format!("{} {} {}", self.year, self.brand, self.model);
        match &self.kind {
            VehicleKind::Car { doors, fuel } => {
                format!("{head} | Car | Doors: {doors} | Fuel: {fuel}")
            }
            VehicleKind::Bike { sidecar, category } => {
                format!("{head} | Bike | Sidecar: {sidecar} | Category: {category}")
            }
            VehicleKind::Truck { payload_kg, trailer } => {
                format!("{head} | Truck | Payload: {payload_kg} kg | Trailer: {trailer}")
            }
            VehicleKind::Motorcycle { engine_cc, category } => {
                format!("{head} | Motorcycle | Engine: {engine_cc}cc | Category: {category}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> Vehicle {
        Vehicle::new(
            "Toyota",
            "Camry",
            2021,
            VehicleKind::Car {
                doors: 4,
                fuel: "Petrol".to_string(),
            },
        )
    }

    #[test]
    fn test_new_mints_unique_ids() {
        let a = car();
        let b = car();
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_with_id_preserves_identity() {
        let v = car().with_id("v-1");
        assert_eq!(v.id, "v-1");
        assert_eq!(v.brand, "Toyota");
    }

    #[test]
    fn test_max_speed_per_variant() {
        assert_eq!(car().max_speed(), 250.0);

        let bike = Vehicle::new(
            "Honda",
            "CB500F",
            2020,
            VehicleKind::Bike {
                sidecar: false,
                category: "Sports".to_string(),
            },
        );
        assert_eq!(bike.max_speed(), 300.0);

        let truck = Vehicle::new(
            "Ford",
            "F-150",
            2019,
            VehicleKind::Truck {
                payload_kg: 1500.0,
                trailer: false,
            },
        );
        assert_eq!(truck.max_speed(), 180.0);

        let motorcycle = Vehicle::new(
            "Yamaha",
            "R1",
            2022,
            VehicleKind::Motorcycle {
                engine_cc: 1000,
                category: "Sports".to_string(),
            },
        );
        assert_eq!(motorcycle.max_speed(), 230.0);
    }

    #[test]
    fn test_tag_matches_case_insensitively() {
        let v = car();
        assert_eq!(v.kind.tag(), "Car");
        assert!(v.kind.matches_tag("car"));
        assert!(v.kind.matches_tag("CAR"));
        assert!(!v.kind.matches_tag("truck"));
    }

    #[test]
    fn test_wire_format_is_flat() {
        let v = car().with_id("v-1");
        let json = serde_json::to_value(&v).unwrap();

        assert_eq!(json["id"], "v-1");
        assert_eq!(json["type"], "Car");
        assert_eq!(json["brand"], "Toyota");
        assert_eq!(json["year"], 2021);
        assert_eq!(json["doors"], 4);
        assert_eq!(json["fuel"], "Petrol");
    }

    #[test]
    fn test_wire_format_renames_variant_fields() {
        let truck = Vehicle::new(
            "Ford",
            "F-150",
            2019,
            VehicleKind::Truck {
                payload_kg: 1500.0,
                trailer: true,
            },
        )
        .with_id("t-1");
        let json = serde_json::to_value(&truck).unwrap();
        assert_eq!(json["payload"], 1500.0);
        assert_eq!(json["trailer"], true);

        let motorcycle = Vehicle::new(
            "Yamaha",
            "R1",
            2022,
            VehicleKind::Motorcycle {
                engine_cc: 1000,
                category: "Sports".to_string(),
            },
        );
        let json = serde_json::to_value(&motorcycle).unwrap();
        assert_eq!(json["cc"], 1000);
    }

    #[test]
    fn test_wire_round_trip() {
        let v = car().with_id("v-1");
        let json = serde_json::to_string(&v).unwrap();
        let parsed: Vehicle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }

    #[test]
    fn test_start_and_stop_messages() {
        let car = car();
        assert_eq!(car.start_message(), "Car engine started with Petrol fuel");
        assert_eq!(car.stop_message(), "Car engine stopped");

        let truck = Vehicle::new(
            "Ford",
            "F-150",
            2019,
            VehicleKind::Truck {
                payload_kg: 1500.0,
                trailer: false,
            },
        );
        assert_eq!(truck.start_message(), "Truck engine started");
        assert_eq!(truck.stop_message(), "Truck engine stopped");
    }

    #[test]
    fn test_describe_contains_identity_and_variant_fields() {
        let v = car();
        let line = v.describe();
        assert!(line.contains("2021 Toyota Camry"));
        assert!(line.contains("Doors: 4"));
        assert!(line.contains("Fuel: Petrol"));
    }
}
