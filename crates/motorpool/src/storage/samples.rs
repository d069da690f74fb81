use motorpool_core::vehicle::{Vehicle, VehicleKind};

/// Example records seeded into empty SQL-backed catalogs, one per variant.
pub(crate) fn sample_vehicles() -> Vec<Vehicle> {
    vec![
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
                sidecar: false,
                category: "Sports".to_string(),
            },
        ),
        Vehicle::new(
            "Ford",
            "F-150",
            2019,
            VehicleKind::Truck {
                payload_kg: 1500.0,
                trailer: false,
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
    ]
}
