use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Canonical identifier for allocations and students.
///
/// Identifiers reach the service as path segments, JSON strings, JSON numbers
/// and roster map keys. They are normalized here once: surrounding whitespace
/// is dropped and anything that denotes an integer (`"01"`, `"1.0"`, `"1e0"`,
/// `1.0`) is stored in its decimal form, so all of those compare equal to `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

pub type AllocationRef = Identifier;
pub type StudentRef = Identifier;

impl Identifier {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        match integral(trimmed) {
            Some(n) => Self(n.to_string()),
            None => Self(trimmed.to_string()),
        }
    }

    /// Reads an identifier from a JSON number or string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::from(i),
                None => Self::new(n.to_string()),
            }),
            Value::String(s) => Some(Self::new(s)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The numeric form, when the identifier is an integer.
    pub fn as_int(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

/// Integer denoted by `s`, accepting float notation with no fractional part.
fn integral(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok().filter(|f| f.is_finite() && f.fract() == 0.0)?;
    if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_int() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| D::Error::custom(format!("expected a string or number id, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_numeric_strings() {
        assert_eq!(Identifier::new("01"), Identifier::from(1));
        assert_eq!(Identifier::new(" 7 "), Identifier::from(7));
        assert_eq!(Identifier::new("abc").as_str(), "abc");
        assert!(Identifier::new("   ").is_empty());
    }

    #[test]
    fn integral_float_notation_matches_the_integer() {
        assert_eq!(Identifier::new("1.0"), Identifier::from(1));
        assert_eq!(Identifier::new("1e0"), Identifier::from(1));
        assert_eq!(Identifier::from_value(&serde_json::json!(1.0)), Some(Identifier::from(1)));
        assert_ne!(Identifier::new("1.5"), Identifier::from(1));
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let from_num: Identifier = serde_json::from_str("3").unwrap();
        let from_str: Identifier = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "3");

        let text: Identifier = serde_json::from_str("\"A10\"").unwrap();
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"A10\"");
    }

    #[test]
    fn rejects_non_scalar_values() {
        assert!(serde_json::from_str::<Identifier>("{}").is_err());
        assert!(serde_json::from_str::<Identifier>("true").is_err());
    }
}
