//! Key-value byte store backing task persistence
//!
//! The task list is stored as one value under a fixed key. `FileStore`
//! keeps each key as a file under a data directory; `MemoryStore` backs
//! tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Storage key for the serialized task list
pub const TASKS_KEY: &str = "zenplan_todos";

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Byte-level key-value storage
pub trait KvStore: Send {
    /// Read the value stored under `key`, None when the key has never
    /// been written
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any prior value
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// File-backed store: one file per key under a base directory
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened file store");
        Ok(Self { base_path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.key_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path().join("store")).unwrap();

        assert!(store.get(TASKS_KEY).unwrap().is_none());

        store.put(TASKS_KEY, b"[1,2,3]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().unwrap(), b"[1,2,3]");

        // Overwrite replaces the prior value
        store.put(TASKS_KEY, b"[]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("store");

        {
            let mut store = FileStore::open(&dir).unwrap();
            store.put("some_key", b"persisted").unwrap();
        }

        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get("some_key").unwrap().unwrap(), b"persisted");
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.put("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"v");
    }
}
