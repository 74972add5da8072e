//! Key-value store contract and its adapters.
//!
//! The board endpoint only needs two operations from a store: read a
//! JSON value by key, and write one with a time-to-live. Adapters:
//!
//! - [`MemoryStore`] keeps entries in process (tests, local runs)
//! - [`SqliteStore`] keeps entries in a SQLite file via diesel
//! - [`UpstashStore`] talks to a Redis-over-REST service

mod error;
mod memory;
mod sqlite;
mod upstash;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use upstash::UpstashStore;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;

/// Minimal key-value contract: get by key, set with a TTL.
///
/// Entries past their TTL read as absent.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl_seconds: u64,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        (**self).get(key).await
    }

    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        (**self).set(key, value, ttl_seconds).await
    }
}

/// Moment an entry written at `now` with `ttl_seconds` expires.
pub(crate) fn expires_at(now: DateTime<Utc>, ttl_seconds: u64) -> DateTime<Utc> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
