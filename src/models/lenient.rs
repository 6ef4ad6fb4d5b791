//! Tolerant readers for loosely typed JSON values.
//!
//! The backing document is hand-edited mock data, so numbers may arrive as
//! strings and labels as numbers. These helpers never fail; a value that
//! cannot be interpreted reads as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Identifier;

pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        _ => Some(value.to_string()),
    }
}

pub(crate) fn int(value: &Value) -> Option<i64> {
    Identifier::from_value(value).and_then(|id| id.as_int())
}

/// Presence flag: booleans as-is, `"true"`/`"1"` strings and non-zero numbers
/// count as present; anything else as absent.
pub(crate) fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1"),
        _ => false,
    }
}

pub(crate) fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(text))
}

pub(crate) fn de_uint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(int)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0))
}

pub(crate) fn de_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
