use thiserror::Error;

use crate::models::Category;

/// Failures the pipeline can surface. Any of these aborts the run before a
/// single write is issued.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required respondent category had no matching rows (strict mode only)
    #[error("no survey rows for required category: {0}")]
    MissingCategory(Category),

    /// A timestamp cell did not match the export's date format
    #[error("record {id}: malformed timestamp {value:?}")]
    MalformedTimestamp { id: u64, value: String },

    /// A numeric field held non-numeric content
    #[error("record {id}: invalid number {value:?} for field {field}")]
    InvalidNumber {
        id: u64,
        field: &'static str,
        value: String,
    },
}
