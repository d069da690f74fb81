//! The on-disk snapshot format for the in-memory backend.
//!
//! A bracketed list of brace-delimited objects, each a comma-separated list
//! of `"key":value` pairs. This is not a compliant JSON codec: existing
//! snapshot files were written by a hand-rolled serializer whose quirks
//! are kept for compatibility.
//!
//! - On write, a `"` inside a string value is backslash-escaped. On read,
//!   quote characters are simply stripped, so values containing literal
//!   quotes do not round-trip (the backslash survives, the quote does not).
//! - A record that fails to decode is skipped with a warning; the rest of
//!   the snapshot still loads.
//!
//! New call sites that need a wire format must use `serde_json` on
//! [`Vehicle`] instead of this module.

use std::collections::BTreeMap;

use crate::vehicle::{Vehicle, VehicleKind};

use super::fields::decode_record;

/// Renders the full vehicle list to the snapshot text format.
pub fn render_snapshot(vehicles: &[Vehicle]) -> String {
    let mut out = String::from("[");
    for (i, vehicle) in vehicles.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        render_object(&mut out, vehicle);
    }
    out.push_str("\n]");
    out
}

fn render_object(out: &mut String, vehicle: &Vehicle) {
    out.push('{');
    out.push_str(&format!("\"id\":\"{}\"", vehicle.id));
    out.push_str(&format!(",\"type\":\"{}\"", vehicle.kind.tag()));
    out.push_str(&format!(",\"brand\":\"{}\"", escape(&vehicle.brand)));
    out.push_str(&format!(",\"model\":\"{}\"", escape(&vehicle.model)));
    out.push_str(&format!(",\"year\":{}", vehicle.year));
    match &vehicle.kind {
        VehicleKind::Car { doors, fuel } => {
            out.push_str(&format!(",\"doors\":{doors}"));
            out.push_str(&format!(",\"fuel\":\"{}\"", escape(fuel)));
        }
        VehicleKind::Bike { sidecar, category } => {
            out.push_str(&format!(",\"sidecar\":{sidecar}"));
            out.push_str(&format!(",\"category\":\"{}\"", escape(category)));
        }
        VehicleKind::Truck { payload_kg, trailer } => {
            out.push_str(&format!(",\"payload\":{payload_kg}"));
            out.push_str(&format!(",\"trailer\":{trailer}"));
        }
        VehicleKind::Motorcycle { engine_cc, category } => {
            out.push_str(&format!(",\"cc\":{engine_cc}"));
            out.push_str(&format!(",\"category\":\"{}\"", escape(category)));
        }
    }
    out.push('}');
}

/// Write-side escaping. The read side does not unescape; `split_pairs`
/// strips quote characters instead.
fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// Parses snapshot text back into vehicles.
///
/// Records that fail to decode (unknown discriminator, missing identity
/// field, unparseable number) are logged and skipped; the caller receives
/// whatever did decode.
pub fn parse_snapshot(input: &str) -> Vec<Vehicle> {
    let mut vehicles = Vec::new();
    let mut idx = 0;

    while let Some(start) = find_from(input, '{', idx) {
        let Some(end) = find_from(input, '}', start) else {
            break;
        };
        let object = &input[start + 1..end];

        match decode_record(&split_pairs(object)) {
            Ok(vehicle) => vehicles.push(vehicle),
            Err(error) => {
                tracing::warn!(%error, "skipping malformed snapshot record");
            }
        }

        idx = end + 1;
    }

    vehicles
}

fn find_from(input: &str, needle: char, from: usize) -> Option<usize> {
    input[from..].find(needle).map(|i| from + i)
}

/// Splits an object body into a key/value map: commas outside quotes
/// separate pairs, the first colon separates key from value, and quote
/// characters are stripped rather than unescaped.
fn split_pairs(object: &str) -> BTreeMap<String, String> {
    let mut pairs = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in object.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        }
        if ch == ',' && !in_quotes {
            pairs.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pairs.push(current);
    }

    let mut map = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once(':') else {
            continue;
        };
        let key = key.trim().replace('"', "");
        let mut value = value.trim().to_string();
        if value.starts_with('"') {
            value = value.replace('"', "");
        }
        map.insert(key, value);
    }
    map
}
