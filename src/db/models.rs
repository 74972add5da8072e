//! Database models for stored key-value entries.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored entry. `value` holds JSON text.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct KvEntry {
    entry_key: String,
    value: String,
    expires_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable entry; writing an existing key replaces it.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry {
    entry_key: String,
    value: String,
    expires_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}
