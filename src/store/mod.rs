//! Record store for mentorlog.
//!
//! This module provides `SQLite`-backed persistence for the register's
//! record collections. The database is treated as a local key-value medium:
//! each collection is one row, keyed by name, whose payload is the full
//! record sequence serialized as a JSON array, most-recently-added first.
//!
//! The store is generic over the record shape. `list` never fails for a
//! missing or undecodable collection (it degrades to empty with a logged
//! warning); `append` rewrites the whole sequence in a single statement, so
//! a call either lands completely or not at all, and write failures surface
//! to the caller.

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::Record;

/// Durable store for named record collections.
///
/// All operations are async; the connection sits behind a mutex so only one
/// read-modify-write is in flight at a time within a process. A concurrent
/// writer in another process still races last-writer-wins on the same
/// collection, which the single-client usage model accepts.
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Mutex<Connection>,
}

impl RecordStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't
    /// exist, and applies the schema idempotently.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        for statement in schema::SCHEMA_STATEMENTS {
            conn.execute(statement, [])?;
        }

        info!("Record store opened at {}", path.display());
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        for statement in schema::SCHEMA_STATEMENTS {
            conn.execute(statement, [])?;
        }

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(conn),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all records in the named collection, most recent first.
    ///
    /// A collection that has never been written yields an empty vector. So
    /// does a collection whose persisted payload no longer decodes; the
    /// decode failure is logged but must not block the caller or any
    /// subsequent appends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let conn = self.conn.lock().await;
        let Some(payload) = read_payload(&conn, collection)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(source) => {
                let err = Error::CorruptCollection {
                    collection: collection.to_string(),
                    source,
                };
                warn!("{err}; returning empty sequence");
                Ok(Vec::new())
            }
        }
    }

    /// Append a record to the front of the named collection.
    ///
    /// The full updated sequence is persisted in one statement: existing
    /// records are neither reordered nor dropped, and no partial write is
    /// ever visible to a subsequent read. If the existing payload is
    /// undecodable the collection restarts from the new record alone, so a
    /// corrupt collection never blocks new entries.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails. Write
    /// failures are never swallowed.
    pub async fn append<T: Serialize>(&self, collection: &str, record: &T) -> Result<()> {
        let conn = self.conn.lock().await;

        let mut sequence = match read_payload(&conn, collection)? {
            None => Vec::new(),
            Some(payload) => match serde_json::from_str::<Vec<serde_json::Value>>(&payload) {
                Ok(existing) => existing,
                Err(source) => {
                    let err = Error::CorruptCollection {
                        collection: collection.to_string(),
                        source,
                    };
                    warn!("{err}; restarting collection from the new record");
                    Vec::new()
                }
            },
        };

        sequence.insert(0, serde_json::to_value(record)?);
        let payload = serde_json::to_string(&sequence)?;

        conn.execute(
            r"
            INSERT INTO collections (name, payload, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
            params![collection, payload],
        )?;

        debug!(
            "Appended record to '{}' ({} total)",
            collection,
            sequence.len()
        );
        Ok(())
    }

    /// List all records of a typed collection, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub async fn records<R: Record>(&self) -> Result<Vec<R>> {
        self.list(R::COLLECTION).await
    }

    /// Append a typed record to its collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub async fn append_record<R: Record>(&self, record: &R) -> Result<()> {
        self.append(R::COLLECTION, record).await
    }

    /// Count the records in the named collection.
    ///
    /// Missing and undecodable collections count as zero.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub async fn count(&self, collection: &str) -> Result<usize> {
        let records: Vec<serde_json::Value> = self.list(collection).await?;
        Ok(records.len())
    }

    /// Per-collection record counts for every collection that has been
    /// written, ordered by collection name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub async fn collection_counts(&self) -> Result<Vec<(String, usize)>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT name, payload FROM collections ORDER BY name")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .map(|(name, payload)| {
                let count = serde_json::from_str::<Vec<serde_json::Value>>(&payload)
                    .map(|seq| seq.len())
                    .unwrap_or(0);
                (name, count)
            })
            .collect())
    }
}

/// Read the raw payload stored under a collection name, if any.
fn read_payload(conn: &Connection, collection: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT payload FROM collections WHERE name = ?1",
        [collection],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}
