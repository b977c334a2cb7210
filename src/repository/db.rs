//! Database Connection and Setup
//!
//! SQLite-backed key-value store and its migrations.

use std::path::Path;

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Key-value store kept in a single `kv_store` table
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Open (or create) a database at the given path
    pub fn open(path: &Path) -> DomainResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            DomainError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Self::init_with_connection(conn)
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> DomainResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> DomainResult<Self> {
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> DomainResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> DomainResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            );

            PRAGMA user_version = 1;",
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv.db");
        {
            let mut store = SqliteKvStore::open(&path).unwrap();
            store.set("savedStoreArray", b"[\"Aldi\",\"\",\"\",\"\",\"\"]").unwrap();
        }
        let store = SqliteKvStore::open(&path).unwrap();
        assert_eq!(
            store.get("savedStoreArray").unwrap(),
            Some(b"[\"Aldi\",\"\",\"\",\"\",\"\"]".to_vec())
        );
    }
}
