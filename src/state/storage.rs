// Key-value local storage backed by the SQLite `local_storage` table
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use super::db::DbConnection;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to get app data directory")]
    NoAppDataDir,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Get the app data directory for ArtVue
pub fn get_app_data_dir() -> StorageResult<PathBuf> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoAppDataDir)?;
    let artvue_dir = data_dir.join("com.artvue.app");
    fs::create_dir_all(&artvue_dir)?;
    Ok(artvue_dir)
}

/// String-keyed storage with the semantics of a browser's `localStorage`:
/// values are opaque strings and a missing key reads as `None`.
#[derive(Clone)]
pub struct LocalStorage {
    db: DbConnection,
}

impl LocalStorage {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Read the value stored under `key`
    pub fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.db.lock();
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write `value` under `key`, replacing any previous value
    pub fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.db.lock();
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete `key`. Removing an absent key is not an error.
    pub fn remove_item(&self, key: &str) -> StorageResult<()> {
        let conn = self.db.lock();
        conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        Ok(())
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let conn = self.db.lock();
        let mut stmt = conn.prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    pub fn clear(&self) -> StorageResult<()> {
        let conn = self.db.lock();
        conn.execute("DELETE FROM local_storage", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::db::{init_db, init_in_memory};
    use tempfile::TempDir;

    fn storage() -> LocalStorage {
        LocalStorage::new(init_in_memory().unwrap())
    }

    #[test]
    fn test_missing_key_reads_none() {
        let storage = storage();
        assert_eq!(storage.get_item("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_get_overwrite() {
        let storage = storage();
        storage.set_item("isAuthenticated", "true").unwrap();
        assert_eq!(
            storage.get_item("isAuthenticated").unwrap().as_deref(),
            Some("true")
        );

        storage.set_item("isAuthenticated", "false").unwrap();
        assert_eq!(
            storage.get_item("isAuthenticated").unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(storage.keys().unwrap(), vec!["isAuthenticated".to_string()]);
    }

    #[test]
    fn test_remove_and_clear() {
        let storage = storage();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        storage.remove_item("a").unwrap();
        storage.remove_item("a").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["b".to_string()]);

        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("artvue.db");

        {
            let storage = LocalStorage::new(init_db(&db_path).unwrap());
            storage.set_item("artFavorites", "[1,3]").unwrap();
        }

        let storage = LocalStorage::new(init_db(&db_path).unwrap());
        assert_eq!(
            storage.get_item("artFavorites").unwrap().as_deref(),
            Some("[1,3]")
        );
    }
}
