use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{lenient, Allocation, AllocationRef, AttendanceRecord, Student};

pub const ALLOCATIONS_KEY: &str = "respostaAlocacoes";
pub const ROSTERS_KEY: &str = "respostaAlunosPorAlocacao";
pub const ATTENDANCE_KEY: &str = "registrosFrequencia";
pub const LOGIN_KEY: &str = "dadosLogin";

/// The simulated logged-in user. Opaque to the service and returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginInfo(pub Value);

impl Default for LoginInfo {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

/// The root of the persisted data.
///
/// The document keeps the loaded JSON object exactly as read; the typed
/// accessors below interpret it on demand. Any JSON object is a valid
/// document, so a loosely typed value can hide an entry from a query but can
/// never make the load fail, and a rewrite reproduces everything it did not
/// append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Default for Document {
    fn default() -> Self {
        let mut root = Map::new();
        root.insert(ALLOCATIONS_KEY.to_string(), json!([]));
        root.insert(ROSTERS_KEY.to_string(), json!({}));
        root.insert(ATTENDANCE_KEY.to_string(), json!([]));
        root.insert(LOGIN_KEY.to_string(), json!({}));
        Self(root)
    }
}

impl Document {
    /// Wraps a JSON object. Returns `None` for any other JSON value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self(root)),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    fn list(&self, key: &str) -> &[Value] {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn allocations(&self) -> Vec<Allocation> {
        self.list(ALLOCATIONS_KEY)
            .iter()
            .map(Allocation::from_value)
            .collect()
    }

    pub fn find_allocation(&self, id: &AllocationRef) -> Option<Allocation> {
        self.list(ALLOCATIONS_KEY)
            .iter()
            .map(Allocation::from_value)
            .find(|a| a.is(id))
    }

    /// Roster entries for an allocation, as stored.
    ///
    /// `None` means no roster was loaded for that allocation (missing key or
    /// a non-list value), which is different from an empty roster.
    pub fn roster(&self, id: &AllocationRef) -> Option<&[Value]> {
        self.0
            .get(ROSTERS_KEY)
            .and_then(Value::as_object)?
            .iter()
            .find(|(key, _)| AllocationRef::new(key) == *id)
            .and_then(|(_, students)| students.as_array())
            .map(Vec::as_slice)
    }

    pub fn students(&self, id: &AllocationRef) -> Vec<Student> {
        self.roster(id)
            .unwrap_or_default()
            .iter()
            .map(Student::from_value)
            .collect()
    }

    /// Roster keys that do not name any allocation.
    pub fn orphan_roster_keys(&self) -> Vec<String> {
        let Some(rosters) = self.0.get(ROSTERS_KEY).and_then(Value::as_object) else {
            return Vec::new();
        };
        rosters
            .keys()
            .filter(|key| self.find_allocation(&AllocationRef::new(key)).is_none())
            .cloned()
            .collect()
    }

    pub fn login(&self) -> LoginInfo {
        self.0
            .get(LOGIN_KEY)
            .cloned()
            .map(LoginInfo)
            .unwrap_or_default()
    }

    /// Attendance records that decode; entries that do not are skipped here
    /// but stay in the document.
    pub fn attendance(&self) -> Vec<AttendanceRecord> {
        self.list(ATTENDANCE_KEY)
            .iter()
            .filter_map(|r| serde_json::from_value(r.clone()).ok())
            .collect()
    }

    /// Number of stored attendance entries, decodable or not.
    pub fn attendance_len(&self) -> usize {
        self.list(ATTENDANCE_KEY).len()
    }

    /// Appends a record, creating the list when absent or null.
    ///
    /// Returns `false` without changing anything when the attendance field
    /// holds some other kind of value.
    pub fn push_attendance(&mut self, record: &AttendanceRecord) -> Result<bool, serde_json::Error> {
        let value = serde_json::to_value(record)?;
        let slot = self
            .0
            .entry(ATTENDANCE_KEY.to_string())
            .or_insert(Value::Null);
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        match slot.as_array_mut() {
            Some(records) => {
                records.push(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Picks the id for a record created at `now_millis`.
    ///
    /// Ids are positive and strictly greater than every id already stored.
    pub fn next_record_id(&self, now_millis: i64) -> u64 {
        let candidate = u64::try_from(now_millis).unwrap_or(0).max(1);
        let last = self
            .list(ATTENDANCE_KEY)
            .iter()
            .filter_map(|r| r.get("id").and_then(lenient::int))
            .filter_map(|id| u64::try_from(id).ok())
            .max();
        match last {
            Some(last) if last >= candidate => last.saturating_add(1),
            _ => candidate,
        }
    }

    // Builders, mostly for fixtures.

    pub fn with_allocation(mut self, allocation: &Allocation) -> Self {
        let value = allocation.to_value();
        let slot = self
            .0
            .entry(ALLOCATIONS_KEY.to_string())
            .or_insert_with(|| json!([]));
        match slot {
            Value::Array(items) => items.push(value),
            other => *other = json!([value]),
        }
        self
    }

    pub fn with_roster(mut self, key: impl Into<String>, students: &[Student]) -> Self {
        let students = students.iter().map(Student::to_value).collect();
        let rosters = self
            .0
            .entry(ROSTERS_KEY.to_string())
            .or_insert_with(|| json!({}));
        if !rosters.is_object() {
            *rosters = json!({});
        }
        if let Some(rosters) = rosters.as_object_mut() {
            rosters.insert(key.into(), Value::Array(students));
        }
        self
    }

    pub fn with_login(mut self, login: Value) -> Self {
        self.0.insert(LOGIN_KEY.to_string(), login);
        self
    }
}
