use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{lenient, AllocationRef, StudentRef};

/// One student's presence in an attendance submission.
///
/// Decoding is tolerant: `id_aluno` may be a number or a string, and a
/// missing or unrecognized `presente` counts as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceEntry {
    #[serde(rename = "id_aluno")]
    pub student_id: Option<StudentRef>,
    #[serde(rename = "presente")]
    pub present: bool,
}

impl PresenceEntry {
    pub fn new(student_id: i64, present: bool) -> Self {
        Self {
            student_id: Some(StudentRef::from(student_id)),
            present,
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            student_id: value.get("id_aluno").and_then(StudentRef::from_value),
            present: value.get("presente").is_some_and(lenient::flag),
        }
    }
}

impl<'de> Deserialize<'de> for PresenceEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

/// A submitted attendance snapshot for one allocation, date and period.
///
/// Records are append-only: they are created by the recorder and never
/// updated or removed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Milliseconds since the Unix epoch at submission time, bumped past the
    /// newest existing record when the clock has not advanced.
    #[serde(default, deserialize_with = "lenient::de_uint")]
    pub id: u64,
    #[serde(rename = "id_alocacao")]
    pub allocation_id: AllocationRef,
    #[serde(rename = "data_aula", default, deserialize_with = "lenient::de_text")]
    pub class_date: Option<String>,
    /// Term or period label (e.g. an academic bimester).
    #[serde(rename = "etapa", default, deserialize_with = "lenient::de_text")]
    pub period: Option<String>,
    #[serde(rename = "presencas", default)]
    pub entries: Vec<PresenceEntry>,
    #[serde(
        rename = "registrado_em",
        default,
        deserialize_with = "lenient::de_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.present).count()
    }

    pub fn absent_count(&self) -> usize {
        self.entries.len() - self.present_count()
    }
}

/// Input for recording attendance.
///
/// Every field is optional at the wire level so that missing fields surface
/// as an invalid-input error from the recorder instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordAttendanceInput {
    #[serde(rename = "id_alocacao")]
    pub allocation_id: Option<AllocationRef>,
    #[serde(rename = "data_aula", default, deserialize_with = "lenient::de_text")]
    pub class_date: Option<String>,
    #[serde(rename = "etapa", default, deserialize_with = "lenient::de_text")]
    pub period: Option<String>,
    #[serde(rename = "presencas")]
    pub entries: Option<Vec<PresenceEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAttendanceResponse {
    pub id: u64,
    pub message: String,
}
