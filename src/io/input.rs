use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{RawRow, SurveyTable};

/// Read a survey export CSV file into a SurveyTable
pub fn read_survey_file(path: &Path) -> Result<SurveyTable> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_survey_csv(&content)
}

/// Parse survey export CSV text into a SurveyTable
///
/// The export is one table with a superset of columns; the form repeats most
/// question headers once per category section, so repeated names are
/// disambiguated before rows are loaded. Empty cells are dropped.
pub fn parse_survey_csv(data: &str) -> Result<SurveyTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();
    let columns = dedup_headers(&headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let mut row = RawRow::new();
        for (index, column) in columns.iter().enumerate() {
            if let Some(value) = record.get(index) {
                row.set(column.clone(), value);
            }
        }
        rows.push(row);
    }

    Ok(SurveyTable { columns, rows })
}

/// Disambiguate repeated header names by suffixing later occurrences with
/// `.1`, `.2`, ... The rename tables in `models::category` are written
/// against these disambiguated names.
fn dedup_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    headers
        .iter()
        .map(|name| {
            let count = seen.entry(name).or_insert(0);
            let column = if *count == 0 {
                name.to_string()
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            column
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dedup_headers() {
        let headers = csv::StringRecord::from(vec![
            "Timestamp",
            "First Name",
            "Last Name",
            "First Name",
            "Last Name",
            "First Name",
        ]);
        assert_eq!(
            dedup_headers(&headers),
            vec![
                "Timestamp",
                "First Name",
                "Last Name",
                "First Name.1",
                "Last Name.1",
                "First Name.2",
            ]
        );
    }

    #[test]
    fn test_parse_survey_csv() {
        let data = "\
Timestamp,Username,First Name,First Name
2021/09/01 3:00:00 PM PDT,a@b.com,Ada,
2021/09/02 9:15:00 AM PDT,c@d.com,,Grace
";
        let table = parse_survey_csv(data).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns,
            vec!["Timestamp", "Username", "First Name", "First Name.1"]
        );
        assert_eq!(table.rows[0].get("First Name"), Some("Ada"));
        assert_eq!(table.rows[0].get("First Name.1"), None);
        assert_eq!(table.rows[1].get("First Name"), None);
        assert_eq!(table.rows[1].get("First Name.1"), Some("Grace"));
    }

    #[test]
    fn test_parse_quoted_cells() {
        let data = "\
Username,Major,Topics
a@b.com,\"Business, Commerce\",Web;Design
";
        let table = parse_survey_csv(data).unwrap();

        assert_eq!(table.rows[0].get("Major"), Some("Business, Commerce"));
        assert_eq!(table.rows[0].get("Topics"), Some("Web;Design"));
    }

    #[test]
    fn test_read_survey_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Username,First Name\na@b.com,Ada\n").unwrap();

        let table = read_survey_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("Username"), Some("a@b.com"));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_survey_file(Path::new("/does/not/exist.csv"));
        assert!(result.is_err());
    }
}
