use anyhow::Result;
use tracing::info;

use crate::models::{Category, SurveyTable};
use crate::stages::{CategorizeConfig, categorize, clean, emit, remap};
use crate::storage::MemberStore;

/// Configuration for a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub categorize: CategorizeConfig,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub total_rows: usize,
    /// Row counts per category, in emission order
    pub rows_per_category: Vec<(Category, usize)>,
    pub records_written: usize,
}

/// Run the full pipeline: categorize, remap, clean, emit.
///
/// Each stage consumes its input and returns a new collection; nothing is
/// written until the entire record set has cleaned successfully.
pub async fn run_pipeline(
    table: SurveyTable,
    config: &PipelineConfig,
    store: &dyn MemberStore,
) -> Result<PipelineSummary> {
    let total_rows = table.len();

    let groups = categorize(table, &config.categorize)?;
    let rows_per_category: Vec<(Category, usize)> = groups
        .iter()
        .map(|(category, rows)| (category, rows.len()))
        .collect();
    for &(category, count) in &rows_per_category {
        info!("{}: {} rows", category, count);
    }

    let mapped = remap(groups);
    let records = clean(mapped)?;
    info!("Cleaned {} membership records", records.len());

    emit(&records, store).await?;

    Ok(PipelineSummary {
        total_rows,
        rows_per_category,
        records_written: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CATEGORY_COLUMN, RawRow};
    use crate::storage::MemoryStore;
    use serde_json::Value;

    fn base_row(category: Category, email: &str) -> RawRow {
        let mut row = RawRow::new();
        row.set(CATEGORY_COLUMN, category.discriminant());
        row.set("Timestamp", "2021/09/01 3:00:00 PM PDT");
        row.set("Username", email);
        row
    }

    fn sample_table() -> SurveyTable {
        let mut ubc = base_row(Category::UbcStudent, " ubc@x.com ");
        ubc.set("First Name", "Ada");
        ubc.set("Last Name", "Lovelace");
        ubc.set("UBC Student Number", "12345678");
        ubc.set("Academic Year Level", "Year 2");
        ubc.set("Were you a BizTech member last year?", "Yes");
        ubc.set(
            "What topics did you want to see the most discussed in the future? ",
            "A;B;C",
        );

        let mut uni = base_row(Category::UniversityStudent, "uni@x.com");
        uni.set("First Name.1", "Grace");
        uni.set("Last Name.1", "Hopper");
        uni.set("What university do you currently attend?", "SFU");
        uni.set("Academic Year Level.1", "Year 3");
        uni.set("Were you a BizTech member last year?.1", "Maybe");

        let mut hs = base_row(Category::HighSchoolStudent, "hs@x.com");
        hs.set("First Name.2", "Joan");
        hs.set("Last Name.2", "Clarke");
        hs.set("What high-school do you currently attend?", "Magee");
        hs.set("Academic Grade", "Grade 11");

        let na = base_row(Category::Other, "na@x.com");

        // Deliberately out of category order
        SurveyTable {
            columns: vec![],
            rows: vec![hs, ubc, na, uni],
        }
    }

    #[tokio::test]
    async fn test_run_pipeline_preserves_row_count() {
        let store = MemoryStore::new();
        let summary = run_pipeline(sample_table(), &PipelineConfig::default(), &store)
            .await
            .unwrap();

        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.records_written, 4);
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_run_pipeline_orders_and_reindexes() {
        let store = MemoryStore::new();
        run_pipeline(sample_table(), &PipelineConfig::default(), &store)
            .await
            .unwrap();

        let items = store.items();
        let ids: Vec<u64> = items
            .iter()
            .map(|item| item["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        // Category order wins over file order
        let educations: Vec<&str> = items
            .iter()
            .map(|item| item["education"].as_str().unwrap())
            .collect();
        assert_eq!(educations, vec!["UBC", "UNI", "HS", "NA"]);
    }

    #[tokio::test]
    async fn test_run_pipeline_field_semantics() {
        let store = MemoryStore::new();
        run_pipeline(sample_table(), &PipelineConfig::default(), &store)
            .await
            .unwrap();
        let items = store.items();

        let ubc = &items[0];
        assert_eq!(ubc["email"], Value::from("ubc@x.com"));
        assert_eq!(ubc["student_number"], Value::from(12345678u64));
        assert_eq!(ubc["year"], Value::from("2"));
        assert_eq!(ubc["prev_member"], Value::Bool(true));
        assert_eq!(ubc["topics"], serde_json::json!(["A", "B", "C"]));
        // "international" was never answered by anyone: null, so omitted
        assert!(!ubc.contains_key("international"));

        let uni = &items[1];
        assert_eq!(uni["university"], Value::from("SFU"));
        // "Maybe" is neither Yes nor No: key omitted, not false
        assert!(!uni.contains_key("prev_member"));
        assert_eq!(uni["topics"], serde_json::json!(["nan"]));

        let hs = &items[2];
        assert_eq!(hs["high_school"], Value::from("Magee"));
        assert_eq!(hs["year"], Value::from("Grade 11"));
        assert_eq!(hs["student_number"], Value::from(0));
        assert!(!hs.contains_key("prev_member"));

        let na = &items[3];
        assert_eq!(na["education"], Value::from("NA"));
        assert_eq!(na["first_name"], Value::from(""));
    }

    #[tokio::test]
    async fn test_run_pipeline_twice_is_idempotent() {
        let store = MemoryStore::new();
        let first = run_pipeline(sample_table(), &PipelineConfig::default(), &store)
            .await
            .unwrap();
        let after_first = store.items();

        let second = run_pipeline(sample_table(), &PipelineConfig::default(), &store)
            .await
            .unwrap();

        assert_eq!(first.records_written, second.records_written);
        assert_eq!(store.items(), after_first);
    }

    #[tokio::test]
    async fn test_run_pipeline_from_csv() {
        let csv = "\
Timestamp,Username,Please choose the option that's most relevant to you,First Name,UBC Student Number,First Name,First Name
2021/09/01 3:00:00 PM PDT,a@b.com,I am a current/prospective UBC student,Ada,,,
2021/09/01 4:10:00 PM PDT,b@c.com,I am a high school student,,,,Joan
";
        let table = crate::io::parse_survey_csv(csv).unwrap();
        let store = MemoryStore::new();
        run_pipeline(table, &PipelineConfig::default(), &store)
            .await
            .unwrap();

        let items = store.items();
        assert_eq!(items.len(), 2);
        // Blank student number cleans to 0, not an error
        assert_eq!(items[0]["first_name"], Value::from("Ada"));
        assert_eq!(items[0]["student_number"], Value::from(0));
        // Third "First Name" occurrence is the high school section's
        assert_eq!(items[1]["first_name"], Value::from("Joan"));
        assert_eq!(items[1]["education"], Value::from("HS"));
    }

    #[tokio::test]
    async fn test_run_pipeline_strict_categories() {
        let table = SurveyTable {
            columns: vec![],
            rows: vec![base_row(Category::UbcStudent, "ubc@x.com")],
        };
        let config = PipelineConfig {
            categorize: CategorizeConfig {
                require_all_categories: true,
            },
        };
        let store = MemoryStore::new();

        let result = run_pipeline(table, &config, &store).await;
        assert!(result.is_err());
        // Nothing was written before the failure
        assert!(store.is_empty());
    }
}
