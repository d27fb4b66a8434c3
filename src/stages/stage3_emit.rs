use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::info;

use crate::models::MemberRecord;
use crate::storage::{Item, MemberStore};

/// Flatten records into store items, dropping null-valued keys.
///
/// Falsy-but-defined values survive: `0`, `false`, `""`, and empty lists all
/// stay on the item; only nulls (unset tri-state booleans, absent optional
/// fields) are removed.
pub fn to_items(records: &[MemberRecord]) -> Result<Vec<Item>> {
    records
        .iter()
        .map(|record| {
            let value = serde_json::to_value(record)
                .with_context(|| format!("Failed to serialize record {}", record.id))?;
            let Value::Object(mut item) = value else {
                bail!("record {} did not serialize to an object", record.id);
            };
            item.retain(|_, value| !value.is_null());
            Ok(item)
        })
        .collect()
}

/// Stage 3: flatten, surface, and write the record set.
///
/// Every item is logged before the batched write starts; the store chunks
/// the batch per its own contract.
pub async fn emit(records: &[MemberRecord], store: &dyn MemberStore) -> Result<()> {
    let items = to_items(records)?;
    for item in &items {
        info!("{}", serde_json::Value::Object(item.clone()));
    }
    store
        .batch_write(&items)
        .await
        .context("Failed to write membership batch")
}
