use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;

use super::{Item, MemberStore};

/// In-memory store used for dry runs and tests. Upserts by `id`, like the
/// real table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<u64, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored items in ascending id order
    pub fn items(&self) -> Vec<Item> {
        self.items
            .lock()
            .map(|stored| stored.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|stored| stored.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn batch_write(&self, items: &[Item]) -> Result<()> {
        let mut stored = self
            .items
            .lock()
            .map_err(|_| anyhow!("Member store mutex poisoned"))?;
        for item in items {
            let id = item
                .get("id")
                .and_then(Value::as_u64)
                .context("Item is missing a numeric id")?;
            stored.insert(id, item.clone());
        }
        Ok(())
    }
}
