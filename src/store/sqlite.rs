//! SQLite-backed key-value store.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use super::{KvStore, StoreError, expires_at};
use crate::db::{KvRepository, NewKvEntry};

/// Key-value store persisted in a SQLite file.
///
/// Diesel calls are blocking, so each operation runs on tokio's
/// blocking pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    repository: KvRepository,
}

impl SqliteStore {
    /// Opens (and migrates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened.
    #[instrument(skip(path))]
    pub fn open(path: impl Into<String>) -> Result<Self, StoreError> {
        let repository = KvRepository::new(path.into())?;
        Ok(Self { repository })
    }

    /// Removes expired entries. Returns how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> Result<usize, StoreError> {
        let repository = self.repository.clone();
        let removed =
            tokio::task::spawn_blocking(move || repository.purge_expired(Utc::now().naive_utc()))
                .await??;
        Ok(removed)
    }
}

#[async_trait]
impl KvStore for SqliteStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let repository = self.repository.clone();
        let key = key.to_string();
        let entry = tokio::task::spawn_blocking(move || {
            repository.get_live(&key, Utc::now().naive_utc())
        })
        .await??;

        match entry {
            Some(entry) => Ok(Some(serde_json::from_str(entry.value())?)),
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
        let now = Utc::now();
        let entry = NewKvEntry::new(
            key.to_string(),
            serde_json::to_string(&value)?,
            expires_at(now, ttl_seconds).naive_utc(),
            now.naive_utc(),
        );

        let repository = self.repository.clone();
        tokio::task::spawn_blocking(move || repository.upsert(entry)).await??;
        debug!("Entry written");
        Ok(())
    }
}
