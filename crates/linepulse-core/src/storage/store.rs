//! SQLite-backed snapshot persistence.
//!
//! The full [`Metrics`] value is serialized to JSON and stored under a
//! fixed key in a key-value table, so state survives host restarts. A
//! missing or unparseable snapshot loads as `None` and the caller starts a
//! fresh period; a stale snapshot must never take the engine down.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{CoreError, StorageError};
use crate::metrics::Metrics;

const SNAPSHOT_KEY: &str = "metrics.snapshot";

/// Key-value store holding the persisted metrics snapshot.
pub struct MetricsStore {
    conn: Connection,
}

impl MetricsStore {
    /// Open the store at `~/.config/linepulse/linepulse.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("linepulse.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Load the persisted snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot exists or the stored value no
    /// longer deserializes (e.g. written by an older version); the caller
    /// starts fresh in both cases.
    pub fn load(&self) -> Result<Option<Metrics>, StorageError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.and_then(|json| serde_json::from_str(&json).ok()))
    }

    /// Persist the snapshot, replacing any previous value.
    pub fn save(&self, metrics: &Metrics) -> Result<(), StorageError> {
        let json = serde_json::to_string(metrics)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![SNAPSHOT_KEY, json],
        )?;
        Ok(())
    }

    /// Drop the persisted snapshot.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![SNAPSHOT_KEY])?;
        Ok(())
    }
}
