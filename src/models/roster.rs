use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{lenient, AllocationSummary, StudentRef};

/// Read view over one roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Option<StudentRef>,
    pub name: Option<String>,
}

impl Student {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(StudentRef::from(id)),
            name: Some(name.into()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id_aluno").and_then(StudentRef::from_value),
            name: value.get("nome").and_then(lenient::text),
        }
    }

    /// The entry in document layout.
    pub fn to_value(&self) -> Value {
        json!({ "id_aluno": self.id, "nome": self.name })
    }
}

/// An allocation summary paired with its students, used for roster responses.
///
/// `students` holds the roster entries exactly as stored, and is empty when
/// the allocation exists but no roster has been loaded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub info: AllocationSummary,
    #[serde(rename = "alunos")]
    pub students: Vec<Value>,
}
