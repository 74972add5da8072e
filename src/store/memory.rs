//! In-process key-value store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

use super::{KvStore, StoreError, expires_at};

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: serde_json::Value,
    expires_at: DateTime<Utc>,
}

/// Key-value store held in memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, MemoryEntry>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, MemoryEntry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))
    }

    /// Number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// True when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let mut entries = self.lock()?;
        let now = Utc::now();

        let found = entries
            .get(key)
            .map(|entry| (entry.expires_at > now, entry.value.clone()));

        match found {
            Some((true, value)) => Ok(Some(value)),
            Some((false, _)) => {
                debug!("Entry expired, evicting");
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, value))]
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let expires_at = expires_at(Utc::now(), ttl_seconds);
        self.lock()?
            .insert(key.to_string(), MemoryEntry { value, expires_at });
        debug!(%expires_at, "Entry stored");
        Ok(())
    }
}
