use std::collections::HashMap;

use super::{CATEGORY_COLUMN, Category};

/// One raw survey row: source column name → cell text.
///
/// Empty cells are absent from the map, mirroring the null semantics of the
/// export. Values are stored verbatim; no trimming or coercion happens here.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. Empty text is treated as an absent cell and ignored.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.cells.insert(column.into(), value);
        }
    }

    /// Look up a cell by source column name. Returns `None` for empty or
    /// missing cells.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Classify this row by its discriminant cell. Rows with a missing
    /// discriminant fall into `Other`.
    pub fn category(&self) -> Category {
        self.get(CATEGORY_COLUMN)
            .map(Category::from_discriminant)
            .unwrap_or(Category::Other)
    }
}

/// A fully loaded survey export: deduplicated column names plus rows in
/// original file order
#[derive(Debug, Clone, Default)]
pub struct SurveyTable {
    /// Column names after duplicate-header disambiguation
    pub columns: Vec<String>,
    /// Rows in file order
    pub rows: Vec<RawRow>,
}

impl SurveyTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
