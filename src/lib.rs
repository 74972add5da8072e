//! Strictly Board library - bingo board persistence and sharing
//!
//! Game rules live in `strictly_bingo`; this crate moves boards in and
//! out of files and a remote key-value store, and ties each board to a
//! stable id that share links carry.
//!
//! # Architecture
//!
//! - **Gateway**: board files, remote save/load, identity binding
//! - **Service**: board records under `board:<id>` with a seven-day TTL
//! - **Store**: key-value adapters (memory, SQLite, Redis REST)
//! - **Server / Client**: the `/api/board` endpoint and its HTTP client
//!
//! # Example
//!
//! ```no_run
//! use strictly_board::{BingoApp, BoardService, MemoryStore};
//! use url::Url;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = BoardService::new(MemoryStore::new());
//! let mut app = BingoApp::new(service, Url::parse("https://bingo.example/")?);
//!
//! let id = app.save_remote().await?;
//! println!("Share {} (id {})", app.share_url(), id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app;
mod client;
mod config;
mod db;
mod gateway;
mod identity;
mod server;
mod service;
mod share;
mod store;

// Crate-level exports - Application
pub use app::BingoApp;

// Crate-level exports - Configuration
pub use config::{BoardConfig, ConfigError, DEFAULT_CONFIG_FILE, StoreBackend};

// Crate-level exports - Persistence gateway
pub use gateway::{BoardRemote, GatewayError, PersistenceGateway, load_file, save_file};

// Crate-level exports - Identity and share links
pub use identity::{BoardId, IdentityBinding};
pub use share::{BOARD_QUERY_PARAM, board_id_from_url, with_board_id, without_board_id};

// Crate-level exports - Board records
pub use service::{BOARD_TTL_SECONDS, BoardService, DEFAULT_KEY_PREFIX, StoredBoard};

// Crate-level exports - HTTP
pub use client::HttpBoardClient;
pub use server::{
    ErrorResponse, LoadBoardQuery, SaveBoardRequest, SaveBoardResponse, SharedBoardService,
    router, serve,
};

// Crate-level exports - Key-value stores
pub use store::{KvStore, MemoryStore, SqliteStore, StoreError, UpstashStore};

// Crate-level exports - Database
pub use db::{DbError, KvEntry, KvRepository, NewKvEntry};
