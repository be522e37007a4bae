//! Persistence abstraction: one record-store contract, two backends.
//!
//! [`SqliteStore`] persists documents in a single SQLite file;
//! [`MemoryCollection`] keeps them in a mutex-guarded vec for the process
//! lifetime. The backend is picked once at startup and the entity services
//! stay generic over the trait.

pub mod memory;
pub mod sqlite;


use std::future::Future;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use memory::MemoryCollection;
pub use sqlite::{SqliteCollection, SqliteStore, SCHEMA};

/// A record that can live in a store collection.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the record belongs to (e.g. `"contacts"`).
    const COLLECTION: &'static str;

    /// Unique identifier, assigned before the record reaches the store.
    fn id(&self) -> &str;

    /// Creation timestamp used for newest-first listings.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record id already present")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored document is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<tokio_rusqlite::Error> for StoreError {
    fn from(value: tokio_rusqlite::Error) -> Self {
        StoreError::Unavailable(value.to_string())
    }
}

/// Abstraction over one entity collection.
///
/// All methods return `Send` futures so the trait composes with the
/// multi-threaded runtime the routers run on.
pub trait RecordStore<T: Document>: Send + Sync {
    /// Append a record. The id must be unused within the collection.
    fn insert(&self, record: T) -> impl Future<Output = Result<T, StoreError>> + Send + '_;

    /// All records, newest first by creation timestamp.
    fn all(&self) -> impl Future<Output = Result<Vec<T>, StoreError>> + Send + '_;

    /// Exact-id lookup; absence is `Ok(None)`, not an error.
    fn find<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Future<Output = Result<Option<T>, StoreError>> + Send + 'a;

    /// Replace the record carrying the same id; `NotFound` when absent.
    fn update(&self, record: T) -> impl Future<Output = Result<(), StoreError>> + Send + '_;

    /// Number of records in the collection.
    fn count(&self) -> impl Future<Output = Result<u64, StoreError>> + Send + '_;
}
