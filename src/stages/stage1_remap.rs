use std::collections::BTreeMap;

use crate::models::{Category, Field, MappedRow, RawRow};

use super::CategorizedRows;

/// Remap one category's rows into unified-field values, copied verbatim.
///
/// A target field is excluded for the whole group when its source column is
/// empty in every row of the group, so categories never carry fields their
/// form section left untouched.
pub fn remap_group(category: Category, rows: &[RawRow]) -> Vec<BTreeMap<Field, String>> {
    let active: Vec<(&str, Field)> = category
        .rename_table()
        .iter()
        .copied()
        .filter(|(column, _)| rows.iter().any(|row| row.get(column).is_some()))
        .collect();

    rows.iter()
        .map(|row| {
            active
                .iter()
                .filter_map(|&(column, field)| {
                    row.get(column).map(|value| (field, value.to_string()))
                })
                .collect()
        })
        .collect()
}

/// Stage 1: remap all four groups and concatenate them in category order,
/// assigning each row its dense 0-based id by final position.
pub fn remap(groups: CategorizedRows) -> Vec<MappedRow> {
    let mut out: Vec<MappedRow> = Vec::with_capacity(groups.total_rows());
    for (category, rows) in groups.iter() {
        for values in remap_group(category, rows) {
            out.push(MappedRow {
                id: out.len() as u64,
                category,
                values,
            });
        }
    }
    out
}
