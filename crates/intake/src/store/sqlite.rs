//! SQLite-backed document store.
//!
//! Wraps [`tokio_rusqlite`] so database access runs on a dedicated thread
//! without blocking the async runtime. Every record is stored as a JSON
//! document alongside the columns the store itself needs: collection name,
//! id, and creation timestamp.

use std::marker::PhantomData;
use std::path::Path;
use std::time::Duration;

use chrono::SecondsFormat;
use rusqlite::OptionalExtension as _;

use super::{Document, RecordStore, StoreError};

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS records (
    collection  TEXT NOT NULL,
    id          TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, millisecond precision
    doc         TEXT NOT NULL,   -- full JSON document
    PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS records_created_idx ON records(collection, created_at);
";

/// Handle to the durable store. Cloning is cheap; the inner connection is
/// reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
    conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path`, apply the busy timeout, and run
    /// schema initialisation. A failure here is the signal to fall back to
    /// the in-memory backend.
    pub async fn open(path: impl AsRef<Path>, busy_timeout_ms: u64) -> Result<Self, StoreError> {
        let conn = tokio_rusqlite::Connection::open(path.as_ref().to_path_buf()).await?;
        let store = Self { conn };
        store.init_schema(busy_timeout_ms).await?;
        Ok(store)
    }

    /// Open an in-memory database — useful for testing.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = tokio_rusqlite::Connection::open_in_memory().await?;
        let store = Self { conn };
        store.init_schema(0).await?;
        Ok(store)
    }

    async fn init_schema(&self, busy_timeout_ms: u64) -> Result<(), StoreError> {
        self.conn
            .call(move |conn| {
                conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Typed view over one collection.
    pub fn collection<T: Document>(&self) -> SqliteCollection<T> {
        SqliteCollection {
            conn: self.conn.clone(),
            _marker: PhantomData,
        }
    }
}

/// Typed handle implementing [`RecordStore`] for one collection.
pub struct SqliteCollection<T> {
    conn: tokio_rusqlite::Connection,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteCollection<T> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            _marker: PhantomData,
        }
    }
}

fn encode_ts(value: chrono::DateTime<chrono::Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn is_constraint_violation(err: &tokio_rusqlite::Error) -> bool {
    matches!(
        err,
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(inner, _))
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl<T: Document> RecordStore<T> for SqliteCollection<T> {
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let doc = serde_json::to_string(&record)?;
        let id = record.id().to_string();
        let created_at = encode_ts(record.created_at());

        let result = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO records (collection, id, created_at, doc)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![T::COLLECTION, id, created_at, doc],
                )?;
                Ok(())
            })
            .await;

        match result {
            Ok(()) => Ok(record),
            Err(err) if is_constraint_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn all(&self) -> Result<Vec<T>, StoreError> {
        let docs: Vec<String> = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT doc FROM records
                     WHERE collection = ?1
                     ORDER BY created_at DESC",
                )?;
                let rows = stmt
                    .query_map(rusqlite::params![T::COLLECTION], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(rows)
            })
            .await?;

        docs.iter()
            .map(|doc| serde_json::from_str(doc).map_err(StoreError::from))
            .collect()
    }

    async fn find(&self, id: &str) -> Result<Option<T>, StoreError> {
        let id = id.to_string();
        let doc: Option<String> = self
            .conn
            .call(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT doc FROM records WHERE collection = ?1 AND id = ?2",
                        rusqlite::params![T::COLLECTION, id],
                        |row| row.get(0),
                    )
                    .optional()?)
            })
            .await?;

        doc.map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn update(&self, record: T) -> Result<(), StoreError> {
        let doc = serde_json::to_string(&record)?;
        let id = record.id().to_string();

        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE records SET doc = ?3 WHERE collection = ?1 AND id = ?2",
                    rusqlite::params![T::COLLECTION, id, doc],
                )?;
                Ok(changed)
            })
            .await?;

        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: u64 = self
            .conn
            .call(move |conn| {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM records WHERE collection = ?1",
                    rusqlite::params![T::COLLECTION],
                    |row| row.get(0),
                )?)
            })
            .await?;
        Ok(count)
    }
}
