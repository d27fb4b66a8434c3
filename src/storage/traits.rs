use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A flat key→value item as handed to the store
pub type Item = Map<String, Value>;

/// Storage collaborator for normalized membership records.
///
/// Writes are upserts keyed by the item's `id`; re-running the pipeline
/// against the same table overwrites rather than duplicates. At-least-once
/// semantics; chunking and retries are the implementation's concern.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn batch_write(&self, items: &[Item]) -> Result<()>;
}
