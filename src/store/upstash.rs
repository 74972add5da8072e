//! Redis-over-REST store (Upstash / Vercel KV wire format).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{KvStore, StoreError};

/// Reply envelope: either `{"result": ...}` or `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Key-value store reached over a Redis REST endpoint.
///
/// Commands are posted as JSON arrays (`["GET", key]`) with bearer
/// token auth. Values are stored as JSON text.
#[derive(Debug, Clone)]
pub struct UpstashStore {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl UpstashStore {
    /// Creates a client for the given REST endpoint and token.
    #[instrument(skip(token), fields(url = %url))]
    pub fn new(url: String, token: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    #[instrument(skip(self, command))]
    async fn command(&self, command: serde_json::Value) -> Result<serde_json::Value, StoreError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&command)
            .send()
            .await?;

        let status = response.status();
        let reply: CommandReply = response.json().await.map_err(|e| {
            error!(status = %status, error = ?e, "Unreadable store reply");
            StoreError::new(format!("Unreadable store reply ({}): {}", status, e))
        })?;

        if let Some(message) = reply.error {
            error!(status = %status, error = %message, "Store rejected command");
            return Err(StoreError::new(format!("Store rejected command: {}", message)));
        }
        if !status.is_success() {
            return Err(StoreError::new(format!("Store returned {}", status)));
        }

        Ok(reply.result.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl KvStore for UpstashStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let result = self.command(serde_json::json!(["GET", key])).await?;
        match result {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(text) => Ok(Some(serde_json::from_str(&text)?)),
            other => {
                debug!("Store returned a non-string value");
                Ok(Some(other))
            }
        }
    }

    #[instrument(skip(self, value))]
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        if ttl_seconds == 0 {
            // Redis refuses `EX 0`; an entry that expires on write is a delete.
            self.command(serde_json::json!(["DEL", key])).await?;
            debug!("Zero TTL, entry removed");
            return Ok(());
        }

        let text = serde_json::to_string(&value)?;
        let command = serde_json::json!(["SET", key, text, "EX", ttl_seconds]);
        self.command(command).await?;
        debug!(ttl_seconds, "Entry written");
        Ok(())
    }
}
