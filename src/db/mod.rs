//! SQLite persistence layer backing the key-value store.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{KvEntry, NewKvEntry};
pub use repository::KvRepository;
