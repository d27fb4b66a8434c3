use chrono::{Duration, NaiveDateTime};

use crate::error::PipelineError;
use crate::models::{Field, MappedRow, MemberRecord};

/// Timestamp cells look like "2021/09/01 3:00:00 PM PDT"; the trailing
/// 4-character timezone suffix is discarded before parsing.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %I:%M:%S %p";
const TIMEZONE_SUFFIX_LEN: usize = 4;

/// The export's clock runs one hour ahead of the member-facing timezone;
/// every parsed timestamp is shifted back by this amount.
const CLOCK_SKEW_HOURS: i64 = 1;

/// Stage 2: clean the concatenated rows into typed membership records.
///
/// Transforms are per-field and independent; `education` comes from the
/// category captured at stage 0, not from any cell.
pub fn clean(rows: Vec<MappedRow>) -> Result<Vec<MemberRecord>, PipelineError> {
    rows.iter().map(clean_row).collect()
}

fn clean_row(row: &MappedRow) -> Result<MemberRecord, PipelineError> {
    let timestamp_cell = row.value(Field::Timestamp).unwrap_or_default();
    let timestamp =
        parse_timestamp(timestamp_cell).ok_or_else(|| PipelineError::MalformedTimestamp {
            id: row.id,
            value: timestamp_cell.to_string(),
        })?;

    Ok(MemberRecord {
        id: row.id,
        timestamp,
        email: trimmed(row, Field::Email),
        education: row.category.education(),
        first_name: trimmed(row, Field::FirstName),
        last_name: trimmed(row, Field::LastName),
        pronouns: trimmed(row, Field::Pronouns),
        student_number: parse_student_number(row)?,
        year: clean_year(row.value(Field::Year)),
        faculty: trimmed(row, Field::Faculty),
        major: trimmed(row, Field::Major),
        university: trimmed(row, Field::University),
        high_school: trimmed(row, Field::HighSchool),
        prev_member: parse_yes_no(row.value(Field::PrevMember)),
        international: parse_yes_no(row.value(Field::International)),
        topics: split_topics(row.value(Field::Topics)),
        heard_from: trimmed(row, Field::HeardFrom),
    })
}

fn trimmed(row: &MappedRow, field: Field) -> String {
    row.value(field).unwrap_or_default().trim().to_string()
}

/// Parse an export timestamp into epoch seconds, applying the clock skew.
/// Returns None when the cell does not match the expected length or format.
pub(crate) fn parse_timestamp(value: &str) -> Option<i64> {
    let cut = value.len().checked_sub(TIMEZONE_SUFFIX_LEN)?;
    let stripped = value.get(..cut)?;
    let parsed = NaiveDateTime::parse_from_str(stripped, TIMESTAMP_FORMAT).ok()?;
    Some((parsed - Duration::hours(CLOCK_SKEW_HOURS)).and_utc().timestamp())
}

fn parse_student_number(row: &MappedRow) -> Result<u64, PipelineError> {
    match row.value(Field::StudentNumber) {
        None => Ok(0),
        Some(value) => value.trim().parse().map_err(|_| PipelineError::InvalidNumber {
            id: row.id,
            field: Field::StudentNumber.name(),
            value: value.to_string(),
        }),
    }
}

/// Year cells arrive as "Year 2" or "2nd Year"; the literal word is removed
/// and the rest trimmed.
pub(crate) fn clean_year(value: Option<&str>) -> String {
    value.unwrap_or_default().replace("Year", "").trim().to_string()
}

/// Exact "Yes"/"No" map to booleans; anything else, including an absent
/// cell, stays unset so the emitter can omit the key.
pub(crate) fn parse_yes_no(value: Option<&str>) -> Option<bool> {
    match value {
        Some("Yes") => Some(true),
        Some("No") => Some(false),
        _ => None,
    }
}

/// Split a semicolon-delimited topics cell. An absent cell becomes the
/// literal text "nan" before splitting; records already stored in the
/// members table carry that sentinel, so it is kept.
pub(crate) fn split_topics(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or("nan")
        .split(';')
        .map(str::to_string)
        .collect()
}
