//! Behavioral contract shared by every storage backend.
//!
//! Each backend's test module runs these against a fresh repository so the
//! three implementations cannot drift apart on observable behavior. The
//! duplicate-id check is part of the contract: the in-memory backend
//! enforces it explicitly, the SQL backends via their primary key.

use motorpool_core::storage::{RepositoryError, VehicleRepository};
use motorpool_core::vehicle::{Vehicle, VehicleKind};

/// One vehicle per variant, with fixed ids for deterministic assertions.
pub(crate) fn sample_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle::new(
            "Toyota",
            "Camry",
            2021,
            VehicleKind::Car {
                doors: 4,
                fuel: "Petrol".to_string(),
            },
        )
        .with_id("c-1"),
        Vehicle::new(
            "Honda",
            "CB500F",
            2020,
            VehicleKind::Bike {
                sidecar: true,
                category: "Sports".to_string(),
            },
        )
        .with_id("b-1"),
        Vehicle::new(
            "Ford",
            "F-150",
            2019,
            VehicleKind::Truck {
                payload_kg: 1500.0,
                trailer: true,
            },
        )
        .with_id("t-1"),
        Vehicle::new(
            "Yamaha",
            "R1",
            2022,
            VehicleKind::Motorcycle {
                engine_cc: 1000,
                category: "Sports".to_string(),
            },
        )
        .with_id("m-1"),
    ]
}

/// Every variant added then fetched by id comes back field-for-field equal.
pub(crate) async fn round_trips_every_variant(repo: &dyn VehicleRepository) {
    for vehicle in sample_fleet() {
        repo.add(&vehicle).await.unwrap();
        let fetched = repo.get_by_id(&vehicle.id).await.unwrap();
        assert_eq!(fetched, Some(vehicle));
    }
    assert_eq!(repo.get_all().await.unwrap().len(), 4);
}

/// Removing a present id returns true and the record disappears; removing
/// an absent id returns false and changes nothing.
pub(crate) async fn remove_semantics(repo: &dyn VehicleRepository) {
    let fleet = sample_fleet();
    repo.add(&fleet[0]).await.unwrap();
    repo.add(&fleet[1]).await.unwrap();

    assert!(repo.remove_by_id("c-1").await.unwrap());
    assert_eq!(repo.get_by_id("c-1").await.unwrap(), None);

    assert!(!repo.remove_by_id("c-1").await.unwrap());
    assert!(!repo.remove_by_id("no-such-id").await.unwrap());
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

/// The add-then-update scenario: updating at the same id replaces every
/// field of the record while keeping its identity.
pub(crate) async fn update_replaces_in_full(repo: &dyn VehicleRepository) {
    let car = Vehicle::new(
        "Toyota",
        "Camry",
        2021,
        VehicleKind::Car {
            doors: 4,
            fuel: "Petrol".to_string(),
        },
    );
    repo.add(&car).await.unwrap();
    assert_eq!(repo.get_all().await.unwrap().len(), 1);

    let hybrid = Vehicle::new(
        "Toyota",
        "Camry",
        2021,
        VehicleKind::Car {
            doors: 4,
            fuel: "Hybrid".to_string(),
        },
    )
    .with_id(car.id.clone());
    assert!(repo.update(&hybrid).await.unwrap());

    let fetched = repo.get_by_id(&car.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, car.id);
    assert_eq!(
        fetched.kind,
        VehicleKind::Car {
            doors: 4,
            fuel: "Hybrid".to_string(),
        }
    );
}

/// A second add with an already-stored id fails with `DuplicateId`.
pub(crate) async fn rejects_duplicate_ids(repo: &dyn VehicleRepository) {
    let fleet = sample_fleet();
    repo.add(&fleet[0]).await.unwrap();

    let imposter = fleet[1].clone().with_id("c-1");
    let result = repo.add(&imposter).await;
    assert!(
        matches!(result, Err(RepositoryError::DuplicateId { ref id }) if id == "c-1"),
        "expected DuplicateId, got {result:?}"
    );

    // The original record is untouched.
    assert_eq!(repo.get_by_id("c-1").await.unwrap(), Some(fleet[0].clone()));
}

/// Updating an id that was never stored reports false, not an error.
pub(crate) async fn update_on_missing_id_returns_false(repo: &dyn VehicleRepository) {
    let ghost = sample_fleet().remove(0).with_id("no-such-id");
    assert!(!repo.update(&ghost).await.unwrap());
    assert!(repo.get_all().await.unwrap().is_empty());
}
