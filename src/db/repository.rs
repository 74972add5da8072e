//! Database repository for key-value entries with expiry.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, KvEntry, NewKvEntry, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for key-value entries.
#[derive(Debug, Clone)]
pub struct KvRepository {
    db_path: String,
}

impl KvRepository {
    /// Opens the database at the given path and applies pending migrations.
    ///
    /// Every call opens a fresh connection, so the path must name a file;
    /// `":memory:"` would give each call its own empty database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating KvRepository");
        let repository = Self { db_path };
        repository.run_migrations()?;
        Ok(repository)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    #[instrument(skip(self))]
    fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Writes an entry, replacing any existing entry with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, entry), fields(key = %entry.entry_key()))]
    pub fn upsert(&self, entry: NewKvEntry) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        diesel::replace_into(schema::kv_entries::table)
            .values(&entry)
            .execute(&mut conn)?;

        info!(expires_at = %entry.expires_at(), "Entry stored");
        Ok(())
    }

    /// Gets an entry that has not expired at `now`. Returns `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_live(&self, key: &str, now: NaiveDateTime) -> Result<Option<KvEntry>, DbError> {
        let mut conn = self.connection()?;

        let entry = schema::kv_entries::table
            .filter(schema::kv_entries::entry_key.eq(key))
            .filter(schema::kv_entries::expires_at.gt(now))
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;

        if entry.is_some() {
            debug!("Entry found");
        } else {
            debug!("Entry missing or expired");
        }

        Ok(entry)
    }

    /// Deletes every entry that has expired at `now`. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn purge_expired(&self, now: NaiveDateTime) -> Result<usize, DbError> {
        let mut conn = self.connection()?;

        let removed = diesel::delete(
            schema::kv_entries::table.filter(schema::kv_entries::expires_at.le(now)),
        )
        .execute(&mut conn)?;

        info!(removed, "Expired entries purged");
        Ok(removed)
    }
}
