use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{Item, MemberStore};

/// Items per batch request; the storage service rejects larger batches
const DEFAULT_BATCH_SIZE: usize = 25;

/// Configuration for the membership storage service
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the storage service (from ROLLCALL_STORE_URL)
    pub base_url: String,
    /// Target table name
    pub table: String,
    /// Bearer token (from ROLLCALL_STORE_TOKEN), optional
    pub api_token: Option<String>,
    /// Maximum items per batch request
    pub batch_size: usize,
}

impl StoreConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ROLLCALL_STORE_URL")
            .context("ROLLCALL_STORE_URL environment variable not set")?;
        let table = std::env::var("ROLLCALL_STORE_TABLE")
            .unwrap_or_else(|_| "memberships".to_string());
        let api_token = std::env::var("ROLLCALL_STORE_TOKEN").ok();

        Ok(Self {
            base_url,
            table,
            api_token,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Create with custom settings
    pub fn new(base_url: String, table: String) -> Self {
        Self {
            base_url,
            table,
            api_token: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Store backed by the membership storage service's batch upsert endpoint
pub struct HttpStore {
    client: Client,
    config: StoreConfig,
}

#[derive(Debug, Serialize)]
struct BatchWriteRequest<'a> {
    table: &'a str,
    items: &'a [Item],
}

impl HttpStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MemberStore for HttpStore {
    async fn batch_write(&self, items: &[Item]) -> Result<()> {
        let url = format!("{}/batch", self.config.base_url.trim_end_matches('/'));

        for chunk in items.chunks(self.config.batch_size.max(1)) {
            let request = BatchWriteRequest {
                table: &self.config.table,
                items: chunk,
            };

            let mut builder = self.client.post(&url).json(&request);
            if let Some(token) = &self.config.api_token {
                builder = builder.bearer_auth(token);
            }

            let response = builder
                .send()
                .await
                .context("Failed to send batch write request")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("Store error: {} - {}", status, body);
            }

            debug!("Wrote batch of {} items to {}", chunk.len(), self.config.table);
        }

        Ok(())
    }
}
