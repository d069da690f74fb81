//! SQL statements used by the tabular SQLite backend. Pure data, no I/O.

/// One table for the whole vehicle family; `type` is the discriminator and
/// the variant columns are nullable.
pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id TEXT PRIMARY KEY,
    type TEXT NOT NULL,
    brand TEXT NOT NULL,
    model TEXT NOT NULL,
    year INTEGER NOT NULL,
    doors INTEGER,
    fuel TEXT,
    sidecar INTEGER,
    category TEXT,
    payload REAL,
    trailer INTEGER,
    cc INTEGER
);
"#;

pub const INSERT_VEHICLE: &str = r#"
INSERT INTO vehicles (id, type, brand, model, year, doors, fuel, sidecar, category, payload, trailer, cc)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
"#;

pub const SELECT_ALL_VEHICLES: &str = r#"
SELECT id, type, brand, model, year, doors, fuel, sidecar, category, payload, trailer, cc
FROM vehicles
ORDER BY rowid
"#;

pub const SELECT_VEHICLE_BY_ID: &str = r#"
SELECT id, type, brand, model, year, doors, fuel, sidecar, category, payload, trailer, cc
FROM vehicles
WHERE id = ?1
"#;

pub const UPDATE_VEHICLE: &str = r#"
UPDATE vehicles
SET type = ?2, brand = ?3, model = ?4, year = ?5, doors = ?6, fuel = ?7,
    sidecar = ?8, category = ?9, payload = ?10, trailer = ?11, cc = ?12
WHERE id = ?1
"#;

pub const DELETE_VEHICLE: &str = r#"
DELETE FROM vehicles
WHERE id = ?1
"#;

pub const COUNT_VEHICLES: &str = "SELECT COUNT(*) FROM vehicles";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_declares_all_variant_columns() {
        for column in [
            "doors", "fuel", "sidecar", "category", "payload", "trailer", "cc",
        ] {
            assert!(CREATE_TABLE.contains(column), "missing column {column}");
        }
        assert!(CREATE_TABLE.contains("id TEXT PRIMARY KEY"));
    }

    #[test]
    fn test_statements_cover_crud() {
        assert!(INSERT_VEHICLE.contains("INSERT"));
        assert!(SELECT_ALL_VEHICLES.contains("ORDER BY rowid"));
        assert!(SELECT_VEHICLE_BY_ID.contains("WHERE id"));
        assert!(UPDATE_VEHICLE.contains("UPDATE"));
        assert!(DELETE_VEHICLE.contains("DELETE"));
    }
}
