//! SQLite-backed key-value storage.
//!
//! The entire durable footprint of the app is a handful of kv entries:
//! the stop-key token, the theme preference, and the pending trigger the
//! CLI records so `alarm status` works across invocations. There is no
//! schema versioning; a missing key means "unset", never an error.

use std::path::PathBuf;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;

/// SQLite database holding the kv table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/qralarm/qralarm.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(data_dir()?.join("qralarm.db"))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("missing").unwrap().is_none());
        db.kv_set("greeting", "hello").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().unwrap(), "hello");
    }

    #[test]
    fn kv_set_overwrites() {
        let db = Database::open_memory().unwrap();
        db.kv_set("k", "a").unwrap();
        db.kv_set("k", "b").unwrap();
        assert_eq!(db.kv_get("k").unwrap().unwrap(), "b");
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qralarm.db");
        {
            let db = Database::open_at(path.clone()).unwrap();
            db.kv_set("token", "SINK-persisted").unwrap();
        }
        let db = Database::open_at(path).unwrap();
        assert_eq!(db.kv_get("token").unwrap().unwrap(), "SINK-persisted");
    }

    #[test]
    fn kv_delete_makes_key_unset() {
        let db = Database::open_memory().unwrap();
        db.kv_set("k", "a").unwrap();
        db.kv_delete("k").unwrap();
        assert!(db.kv_get("k").unwrap().is_none());
    }
}
