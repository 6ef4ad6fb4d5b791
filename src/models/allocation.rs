use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{lenient, AllocationRef};

/// A teacher's assignment to a class and subject pairing.
///
/// This is a read view over one entry of the document's allocation list. The
/// entry itself stays untouched in the document; fields that are missing or
/// cannot be interpreted read as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub id: Option<AllocationRef>,
    pub class_name: Option<String>,
    pub school_year: Option<i64>,
    pub subject_name: Option<String>,
}

impl Allocation {
    pub fn new(
        id: i64,
        class_name: impl Into<String>,
        school_year: i64,
        subject_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(AllocationRef::from(id)),
            class_name: Some(class_name.into()),
            school_year: Some(school_year),
            subject_name: Some(subject_name.into()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id_alocacao").and_then(AllocationRef::from_value),
            class_name: value.pointer("/turma/nome").and_then(lenient::text),
            school_year: value.pointer("/turma/ano_escolar").and_then(lenient::int),
            subject_name: value.pointer("/disciplina/nome").and_then(lenient::text),
        }
    }

    /// The entry in document layout.
    pub fn to_value(&self) -> Value {
        json!({
            "id_alocacao": self.id,
            "turma": { "nome": self.class_name, "ano_escolar": self.school_year },
            "disciplina": { "nome": self.subject_name },
        })
    }

    pub fn is(&self, id: &AllocationRef) -> bool {
        self.id.as_ref() == Some(id)
    }
}

/// The flattened view of an allocation sent to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    #[serde(rename = "id_alocacao")]
    pub id: Option<AllocationRef>,
    #[serde(rename = "nome_turma")]
    pub class_name: Option<String>,
    #[serde(rename = "ano_escolar")]
    pub school_year: Option<i64>,
    #[serde(rename = "nome_disciplina")]
    pub subject_name: Option<String>,
}

impl From<&Allocation> for AllocationSummary {
    fn from(allocation: &Allocation) -> Self {
        Self {
            id: allocation.id.clone(),
            class_name: allocation.class_name.clone(),
            school_year: allocation.school_year,
            subject_name: allocation.subject_name.clone(),
        }
    }
}

/// School-year constraint for allocation listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    /// No constraint.
    #[default]
    Any,
    Exact(i64),
    /// A year was supplied but is not a number; nothing matches.
    Unmatchable,
}

/// Optional filters for listing allocations. Filters compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationFilter {
    pub year: YearFilter,
    pub subject: Option<String>,
}

impl AllocationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = YearFilter::Exact(year);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Builds a filter from raw query-string values.
    ///
    /// Empty values count as absent. The year is read like a lenient integer
    /// parse: leading whitespace and a sign are allowed, trailing garbage is
    /// ignored, and a value with no leading digits matches nothing.
    pub fn from_params(year: Option<&str>, subject: Option<&str>) -> Self {
        let year = match year.filter(|y| !y.is_empty()) {
            None => YearFilter::Any,
            Some(raw) => parse_leading_int(raw)
                .map(YearFilter::Exact)
                .unwrap_or(YearFilter::Unmatchable),
        };

        Self {
            year,
            subject: subject.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    pub fn matches(&self, allocation: &Allocation) -> bool {
        let year_ok = match self.year {
            YearFilter::Any => true,
            YearFilter::Exact(year) => allocation.school_year == Some(year),
            YearFilter::Unmatchable => false,
        };

        let subject_ok = match self.subject.as_deref() {
            None => true,
            Some(s) => allocation
                .subject_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase() == s.to_lowercase()),
        };

        year_ok && subject_ok
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_param_parses_like_a_lenient_integer() {
        assert_eq!(parse_leading_int("5"), Some(5));
        assert_eq!(parse_leading_int(" 5th"), Some(5));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("five"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn empty_params_do_not_filter() {
        let filter = AllocationFilter::from_params(Some(""), Some(""));
        assert_eq!(filter, AllocationFilter::default());
    }

    #[test]
    fn non_numeric_year_matches_nothing() {
        let filter = AllocationFilter::from_params(Some("abc"), None);
        assert!(!filter.matches(&Allocation::new(1, "5A", 5, "Math")));
    }

    #[test]
    fn subject_match_ignores_case_but_not_whitespace() {
        let allocation = Allocation::new(1, "5A", 5, "Math");
        assert!(AllocationFilter::new().with_subject("MATH").matches(&allocation));
        assert!(!AllocationFilter::new().with_subject("math ").matches(&allocation));
    }

    #[test]
    fn reads_loosely_typed_entries() {
        let allocation = Allocation::from_value(&serde_json::json!({
            "id_alocacao": "7",
            "turma": { "nome": "7A", "ano_escolar": "7" }
        }));

        assert!(allocation.is(&AllocationRef::from(7)));
        assert_eq!(allocation.school_year, Some(7));
        assert_eq!(allocation.subject_name, None);
        assert!(AllocationFilter::new().with_year(7).matches(&allocation));
        assert!(!AllocationFilter::new().with_subject("math").matches(&allocation));
    }

    #[test]
    fn view_round_trips_through_document_layout() {
        let allocation = Allocation::new(1, "5A", 5, "Math");
        assert_eq!(Allocation::from_value(&allocation.to_value()), allocation);
    }
}
