use crate::{
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::{path::Path, sync::Mutex};

/// SQLite-based storage backend keeping every slot as a row
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    const CREATE_TABLE: &'static str =
        "CREATE TABLE IF NOT EXISTS slots (key TEXT PRIMARY KEY, value TEXT NOT NULL)";

    /// Opens (or creates) a database file
    pub fn open(database_path: impl AsRef<Path>) -> Result<Self> {
        let connection = Connection::open(database_path).map_err(sqlite_error)?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(sqlite_error)?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .execute(Self::CREATE_TABLE, [])
            .map_err(sqlite_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| BoardError::StorageError("sqlite connection poisoned".to_string()))?;
        f(&conn).map_err(sqlite_error)
    }
}

fn sqlite_error(err: rusqlite::Error) -> BoardError {
    BoardError::StorageError(err.to_string())
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO slots (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
        })?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| conn.execute("DELETE FROM slots WHERE key = ?1", params![key]))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_slot_roundtrip_in_memory() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        assert_eq!(storage.get_item("board").await.unwrap(), None);
        storage.set_item("board", "first").await.unwrap();
        storage.set_item("board", "second").await.unwrap();
        assert_eq!(
            storage.get_item("board").await.unwrap().as_deref(),
            Some("second")
        );

        storage.remove_item("board").await.unwrap();
        assert_eq!(storage.get_item("board").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_slot_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.set_item("board", "{}").await.unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("board").await.unwrap().as_deref(), Some("{}"));
    }
}
