//! Key/value persistence for the client store
//!
//! Values are JSON documents. `FileStorage` keeps one `<key>.json` file per key
//! in the data directory; `MemoryStorage` keeps them in a map.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

pub const USER_KEY: &str = "streamflix_user";
pub const ACTIVE_PROFILE_KEY: &str = "streamflix_active_profile";
pub const WATCHLIST_KEY: &str = "streamflix_watchlist";
pub const CONTINUE_WATCHING_KEY: &str = "streamflix_continue_watching";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage unavailable")]
    Unavailable,
}

/// String key/value backend
pub trait Storage: Send {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (~/.local/share/flixtui on Linux)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("flixtui"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so readers never see a partial document
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "persisted");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

/// Read and decode a value; missing keys and bad documents yield `default`
pub fn get_from_storage<T: DeserializeOwned>(storage: &dyn Storage, key: &str, default: T) -> T {
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable stored value");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!(key, error = %e, "storage read failed");
            default
        }
    }
}

/// Encode and write a value. Failures are logged, never returned.
pub fn set_to_storage<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| storage.write(key, &json));
    if let Err(e) = result {
        warn!(key, error = %e, "error saving to storage");
    }
}

pub fn remove_from_storage(storage: &dyn Storage, key: &str) {
    if let Err(e) = storage.remove(key) {
        warn!(key, error = %e, "error removing from storage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        set_to_storage(&storage, "numbers", &vec![1, 2, 3]);
        let numbers: Vec<u32> = get_from_storage(&storage, "numbers", Vec::new());
        assert_eq!(numbers, vec![1, 2, 3]);

        remove_from_storage(&storage, "numbers");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_missing_key_returns_default() {
        let storage = MemoryStorage::new();
        let value: Option<String> = get_from_storage(&storage, "absent", None);
        assert!(value.is_none());
    }

    #[test]
    fn test_bad_json_returns_default() {
        let storage = MemoryStorage::new();
        storage.write("broken", "{not json").unwrap();
        let value: Vec<u32> = get_from_storage(&storage, "broken", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let storage = FileStorage::new("/tmp/unused");
        assert!(matches!(
            storage.read("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_null_value_is_stored() {
        let storage = MemoryStorage::new();
        set_to_storage(&storage, ACTIVE_PROFILE_KEY, &None::<String>);
        assert_eq!(storage.read(ACTIVE_PROFILE_KEY).unwrap().as_deref(), Some("null"));
    }
}
