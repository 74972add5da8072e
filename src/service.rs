//! Board records in the key-value store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_bingo::{Board, BoardError};
use tracing::{debug, info, instrument, warn};

use crate::{BoardId, BoardRemote, GatewayError, KvStore, StoreError};

/// Prefix put in front of every board id to form its store key.
pub const DEFAULT_KEY_PREFIX: &str = "board:";

/// How long a saved board lives: seven days.
pub const BOARD_TTL_SECONDS: u64 = 60 * 60 * 24 * 7;

/// A board as kept in the store and returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct StoredBoard {
    /// Cell texts in row-major order.
    squares: Vec<String>,
    /// When the record was written.
    created_at: DateTime<Utc>,
}

impl StoredBoard {
    /// Converts the record into a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidFormat`] if the record does not hold 25 squares.
    pub fn into_board(self) -> Result<Board, BoardError> {
        Board::from_cells(self.squares)
    }
}

/// Saves and loads boards under `<prefix><id>` with a fixed TTL.
#[derive(Debug, Clone)]
pub struct BoardService<S> {
    store: S,
    key_prefix: String,
    ttl_seconds: u64,
}

impl<S: KvStore> BoardService<S> {
    /// Creates a service with the default key prefix and seven-day TTL.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl_seconds: BOARD_TTL_SECONDS,
        }
    }

    /// Replaces the key prefix.
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Replaces the TTL.
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// TTL applied to every save.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Store key for a board id.
    pub fn key_for(&self, id: &BoardId) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    /// Upserts the board under `id`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store write fails.
    #[instrument(skip(self, board), fields(board_id = %id))]
    pub async fn save(&self, id: &BoardId, board: &Board) -> Result<StoredBoard, StoreError> {
        let record = StoredBoard::new(board.cells().to_vec(), Utc::now());
        let value = serde_json::to_value(&record)?;
        self.store
            .set(&self.key_for(id), value, self.ttl_seconds)
            .await?;
        info!(ttl_seconds = self.ttl_seconds, "Board record saved");
        Ok(record)
    }

    /// Fetches the record under `id`. Returns `None` if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store read fails or the record is unreadable.
    #[instrument(skip(self), fields(board_id = %id))]
    pub async fn load(&self, id: &BoardId) -> Result<Option<StoredBoard>, StoreError> {
        let Some(value) = self.store.get(&self.key_for(id)).await? else {
            debug!("No board record");
            return Ok(None);
        };

        let record: StoredBoard = serde_json::from_value(value).map_err(|e| {
            warn!(error = %e, "Stored board record is unreadable");
            StoreError::new(format!("Corrupt board record: {}", e))
        })?;
        debug!(created_at = %record.created_at(), "Board record loaded");
        Ok(Some(record))
    }
}

#[async_trait]
impl<S: KvStore> BoardRemote for BoardService<S> {
    async fn save(&self, id: &BoardId, board: Board) -> Result<(), GatewayError> {
        BoardService::save(self, id, &board).await?;
        Ok(())
    }

    async fn load(&self, id: &BoardId) -> Result<Board, GatewayError> {
        let record = BoardService::load(self, id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        Ok(record.into_board()?)
    }
}
