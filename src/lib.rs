pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;
pub mod storage;

pub use error::PipelineError;
pub use io::{parse_survey_csv, read_survey_file};
pub use models::{
    CATEGORY_COLUMN, Category, Education, Field, MappedRow, MemberRecord, RawRow, SurveyTable,
};
pub use pipeline::{PipelineConfig, PipelineSummary, run_pipeline};
pub use stages::{
    CategorizeConfig, CategorizedRows, categorize, clean, emit, remap, remap_group, to_items,
};
pub use storage::{HttpStore, Item, MemberStore, MemoryStore, StoreConfig};
