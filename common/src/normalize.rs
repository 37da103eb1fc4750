//! Turns a loosely-typed status document into a fully-defined
//! [`SensorSnapshot`]. Total by design: a single bad field must never take
//! the dashboard down, so anything missing, wrong-typed, or non-finite
//! coerces to a safe default instead of propagating an error.

use serde_json::Value;

use crate::types::SensorSnapshot;

pub fn normalize(doc: &Value) -> SensorSnapshot {
    let temperature = coerce_number(doc.get("temperature"));
    let gas = coerce_count(doc.get("gas"));
    let dust = coerce_count(doc.get("dust"));
    // Device-supplied index, trusted verbatim after coercion. Absent or
    // invalid coerces to 0; it is never recomputed on this path.
    let air_quality_index = coerce_number(doc.get("airQualityIndex")).clamp(0.0, 100.0) as u8;
    let fan_on = coerce_bool(doc.get("fan"));

    SensorSnapshot {
        temperature,
        gas,
        dust,
        air_quality_index,
        fan_on,
    }
}

/// Finite number or 0. A repaired `nan` reading arrives here as `null` and
/// lands on 0, as do JSON strings that do not parse as finite numbers.
fn coerce_number(field: Option<&Value>) -> f64 {
    let parsed = match field {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Non-negative integer reading (gas ppm, dust µg/m³).
fn coerce_count(field: Option<&Value>) -> u32 {
    coerce_number(field).max(0.0).round() as u32
}

/// The firmware family emits `true`/`false`, occasionally `1`/`0`, and some
/// revisions quote the literal. Those truthy forms map to true; everything
/// else, absence included, maps to false.
fn coerce_bool(field: Option<&Value>) -> bool {
    match field {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("on") || s == "1"
        }
        _ => false,
    }
}
