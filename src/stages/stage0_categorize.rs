use crate::error::PipelineError;
use crate::models::{Category, RawRow, SurveyTable};

/// Configuration for categorization
#[derive(Debug, Clone, Default)]
pub struct CategorizeConfig {
    /// Fail when any of the four categories has zero rows. Off by default:
    /// a survey period with, say, no high school respondents is still a
    /// valid run.
    pub require_all_categories: bool,
}

/// Rows partitioned by respondent category, each group in original row order
#[derive(Debug, Clone, Default)]
pub struct CategorizedRows {
    pub ubc: Vec<RawRow>,
    pub university: Vec<RawRow>,
    pub high_school: Vec<RawRow>,
    pub other: Vec<RawRow>,
}

impl CategorizedRows {
    pub fn group(&self, category: Category) -> &[RawRow] {
        match category {
            Category::UbcStudent => &self.ubc,
            Category::UniversityStudent => &self.university,
            Category::HighSchoolStudent => &self.high_school,
            Category::Other => &self.other,
        }
    }

    fn group_mut(&mut self, category: Category) -> &mut Vec<RawRow> {
        match category {
            Category::UbcStudent => &mut self.ubc,
            Category::UniversityStudent => &mut self.university,
            Category::HighSchoolStudent => &mut self.high_school,
            Category::Other => &mut self.other,
        }
    }

    pub fn total_rows(&self) -> usize {
        Category::ALL
            .iter()
            .map(|&category| self.group(category).len())
            .sum()
    }

    /// Iterate groups in emission order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[RawRow])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.group(category)))
    }
}

/// Stage 0: partition the survey table into the four category groups.
///
/// Rows with an unrecognized or missing discriminant value land in `Other`,
/// so the partition always covers every input row.
pub fn categorize(
    table: SurveyTable,
    config: &CategorizeConfig,
) -> Result<CategorizedRows, PipelineError> {
    let mut groups = CategorizedRows::default();
    for row in table.rows {
        let category = row.category();
        groups.group_mut(category).push(row);
    }

    if config.require_all_categories {
        for category in Category::ALL {
            if groups.group(category).is_empty() {
                return Err(PipelineError::MissingCategory(category));
            }
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CATEGORY_COLUMN;

    fn row(discriminant: &str, email: &str) -> RawRow {
        let mut row = RawRow::new();
        row.set(CATEGORY_COLUMN, discriminant);
        row.set("Username", email);
        row
    }

    fn sample_table() -> SurveyTable {
        SurveyTable {
            columns: vec![CATEGORY_COLUMN.to_string(), "Username".to_string()],
            rows: vec![
                row("I am a high school student", "hs@x.com"),
                row("I am a current/prospective UBC student", "ubc1@x.com"),
                row("None of the above", "na@x.com"),
                row("I am a current/prospective UBC student", "ubc2@x.com"),
                row("I am a current/prospective university student", "uni@x.com"),
            ],
        }
    }

    #[test]
    fn test_categorize_partitions_in_row_order() {
        let groups = categorize(sample_table(), &CategorizeConfig::default()).unwrap();

        assert_eq!(groups.ubc.len(), 2);
        assert_eq!(groups.university.len(), 1);
        assert_eq!(groups.high_school.len(), 1);
        assert_eq!(groups.other.len(), 1);
        assert_eq!(groups.total_rows(), 5);

        // Intra-category order follows the original file order
        assert_eq!(groups.ubc[0].get("Username"), Some("ubc1@x.com"));
        assert_eq!(groups.ubc[1].get("Username"), Some("ubc2@x.com"));
    }

    #[test]
    fn test_unknown_discriminant_goes_to_other() {
        let table = SurveyTable {
            columns: vec![],
            rows: vec![row("I am an alum", "alum@x.com")],
        };
        let groups = categorize(table, &CategorizeConfig::default()).unwrap();
        assert_eq!(groups.other.len(), 1);
    }

    #[test]
    fn test_empty_group_tolerated_by_default() {
        let table = SurveyTable {
            columns: vec![],
            rows: vec![row("I am a current/prospective UBC student", "ubc@x.com")],
        };
        let groups = categorize(table, &CategorizeConfig::default()).unwrap();
        assert!(groups.high_school.is_empty());
    }

    #[test]
    fn test_strict_mode_requires_all_categories() {
        let table = SurveyTable {
            columns: vec![],
            rows: vec![row("I am a current/prospective UBC student", "ubc@x.com")],
        };
        let config = CategorizeConfig {
            require_all_categories: true,
        };
        let err = categorize(table, &config).unwrap_err();
        assert!(matches!(err, PipelineError::MissingCategory(_)));
    }
}
