//! Board server and client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::service::{BOARD_TTL_SECONDS, DEFAULT_KEY_PREFIX};
use crate::{KvStore, MemoryStore, SharedBoardService, SqliteStore, UpstashStore};

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_board.toml";

/// Which key-value store backs the board endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// Entries live in process and vanish on exit.
    #[default]
    Memory,
    /// Entries live in a SQLite file.
    Sqlite,
    /// Entries live in a Redis REST service.
    Upstash,
}

/// Settings for the board endpoint and the CLI client.
#[derive(Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Store backend.
    #[serde(default)]
    backend: StoreBackend,

    /// SQLite file for the `sqlite` backend.
    #[serde(default = "default_sqlite_path")]
    sqlite_path: String,

    /// REST endpoint for the `upstash` backend.
    #[serde(default)]
    kv_rest_api_url: Option<String>,

    /// Bearer token for the `upstash` backend.
    #[serde(default)]
    kv_rest_api_token: Option<String>,

    /// Prefix of every board key.
    #[serde(default = "default_key_prefix")]
    key_prefix: String,

    /// Lifetime of a saved board.
    #[serde(default = "default_ttl_seconds")]
    ttl_seconds: u64,

    /// Page address share links are built on.
    #[serde(default = "default_share_base_url")]
    share_base_url: String,

    /// Address the server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the server binds to.
    #[serde(default = "default_port")]
    port: u16,
}

fn default_sqlite_path() -> String {
    "strictly_board.db".to_string()
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_ttl_seconds() -> u64 {
    BOARD_TTL_SECONDS
}

fn default_share_base_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sqlite_path: default_sqlite_path(),
            kv_rest_api_url: None,
            kv_rest_api_token: None,
            key_prefix: default_key_prefix(),
            ttl_seconds: default_ttl_seconds(),
            share_base_url: default_share_base_url(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl std::fmt::Debug for BoardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardConfig")
            .field("backend", &self.backend)
            .field("sqlite_path", &self.sqlite_path)
            .field("kv_rest_api_url", &self.kv_rest_api_url)
            .field(
                "kv_rest_api_token",
                &self.kv_rest_api_token.as_ref().map(|_| "<redacted>"),
            )
            .field("key_prefix", &self.key_prefix)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("share_base_url", &self.share_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl BoardConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(backend = %config.backend, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file at `path` if it exists (defaults otherwise), then
    /// applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file is unreadable or invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("No config file, using defaults");
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Checks values every store backend can honour.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `ttl_seconds` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_seconds == 0 {
            return Err(ConfigError::new(
                "ttl_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies `KV_REST_API_URL` / `KV_REST_API_TOKEN` overrides.
    ///
    /// `NEXT_PUBLIC_` prefixed names win over the plain ones. Setting both
    /// URL and token switches a `memory` backend to `upstash`.
    #[instrument(skip(self, lookup))]
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| {
            lookup(&format!("NEXT_PUBLIC_{}", name))
                .or_else(|| lookup(name))
                .filter(|value| !value.trim().is_empty())
        };

        if let Some(url) = var("KV_REST_API_URL") {
            debug!("KV URL taken from environment");
            self.kv_rest_api_url = Some(url);
        }
        if let Some(token) = var("KV_REST_API_TOKEN") {
            debug!("KV token taken from environment");
            self.kv_rest_api_token = Some(token);
        }

        if self.backend == StoreBackend::Memory
            && self.kv_rest_api_url.is_some()
            && self.kv_rest_api_token.is_some()
        {
            info!("KV credentials present, using upstash backend");
            self.backend = StoreBackend::Upstash;
        }
    }

    /// Overrides the backend.
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Parses the share base address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if it is not an absolute URL.
    pub fn share_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.share_base_url).map_err(|e| {
            ConfigError::new(format!(
                "Invalid share base URL '{}': {}",
                self.share_base_url, e
            ))
        })
    }

    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the store cannot be opened or the
    /// upstash backend lacks its URL or token.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub fn open_store(&self) -> Result<Arc<dyn KvStore>, ConfigError> {
        let store: Arc<dyn KvStore> = match self.backend {
            StoreBackend::Memory => {
                warn!("Using in-memory store, boards are lost on exit");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::Sqlite => {
                let store = SqliteStore::open(self.sqlite_path.clone()).map_err(|e| {
                    ConfigError::new(format!("Failed to open SQLite store: {}", e.message))
                })?;
                Arc::new(store)
            }
            StoreBackend::Upstash => {
                let (Some(url), Some(token)) = (&self.kv_rest_api_url, &self.kv_rest_api_token)
                else {
                    return Err(ConfigError::new(
                        "upstash backend needs KV_REST_API_URL and KV_REST_API_TOKEN".to_string(),
                    ));
                };
                Arc::new(UpstashStore::new(url.clone(), token.clone()))
            }
        };
        info!("Store opened");
        Ok(store)
    }

    /// Opens the store and wraps it in a board service with this
    /// config's key prefix and TTL.
    ///
    /// # Errors
    ///
    /// See [`BoardConfig::open_store`].
    pub fn board_service(&self) -> Result<SharedBoardService, ConfigError> {
        Ok(SharedBoardService::new(self.open_store()?)
            .with_key_prefix(self.key_prefix.clone())
            .with_ttl_seconds(self.ttl_seconds))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
