use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Category, Field};

/// Education tag on the emitted record, derived from the respondent category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "UBC")]
    Ubc,
    #[serde(rename = "UNI")]
    Uni,
    #[serde(rename = "HS")]
    Hs,
    #[serde(rename = "NA")]
    Na,
}

impl Education {
    pub fn as_str(&self) -> &'static str {
        match self {
            Education::Ubc => "UBC",
            Education::Uni => "UNI",
            Education::Hs => "HS",
            Education::Na => "NA",
        }
    }
}

/// A row after field remapping, before cleaning.
///
/// Values are verbatim cell text keyed by unified field; a missing entry is
/// the null marker for that field. `id` is the row's position in the
/// concatenated sequence and survives unchanged into the emitted record.
#[derive(Debug, Clone)]
pub struct MappedRow {
    pub id: u64,
    pub category: Category,
    pub values: BTreeMap<Field, String>,
}

impl MappedRow {
    pub fn new(id: u64, category: Category) -> Self {
        Self {
            id,
            category,
            values: BTreeMap::new(),
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }
}

/// Canonical membership record, immutable once cleaned.
///
/// `prev_member` and `international` stay `None` unless the source answered
/// an exact "Yes" or "No"; the emitter omits the key rather than defaulting
/// to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: u64,
    /// Unix epoch seconds
    pub timestamp: i64,
    pub email: String,
    pub education: Education,
    pub first_name: String,
    pub last_name: String,
    pub pronouns: String,
    pub student_number: u64,
    pub year: String,
    pub faculty: String,
    pub major: String,
    pub university: String,
    pub high_school: String,
    pub prev_member: Option<bool>,
    pub international: Option<bool>,
    pub topics: Vec<String>,
    pub heard_from: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_serializes_to_tag() {
        assert_eq!(serde_json::to_string(&Education::Ubc).unwrap(), "\"UBC\"");
        assert_eq!(serde_json::to_string(&Education::Na).unwrap(), "\"NA\"");
    }

    #[test]
    fn test_mapped_row_value() {
        let mut row = MappedRow::new(3, Category::UbcStudent);
        row.values.insert(Field::Email, " a@b.com ".to_string());

        assert_eq!(row.value(Field::Email), Some(" a@b.com "));
        assert_eq!(row.value(Field::Faculty), None);
    }
}
