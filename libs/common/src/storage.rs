//! Local key-value storage for the movie explorer
//!
//! This module provides a small synchronous key-value store with JSON
//! encoding on top. Persistence is best-effort: a missing or corrupt value
//! reads back as the caller's default, and failed writes are logged and
//! dropped.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// Configuration for the on-disk storage directory
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub dir: PathBuf,
}

impl StorageConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Raw string storage addressed by key
pub trait KeyValueBackend: Send + Sync {
    /// Get the raw value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store a raw value under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Process-local backend, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Backend keeping each key in `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open the storage directory, creating it when missing
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        fs::create_dir_all(&config.dir)?;
        debug!("File storage opened at {}", config.dir.display());
        Ok(Self {
            dir: config.dir.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so readers never see half a value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// JSON adapter over a [`KeyValueBackend`]
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone)]
pub struct LocalStorage {
    backend: Arc<dyn KeyValueBackend>,
}

impl LocalStorage {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Storage backed by process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Storage backed by files under the configured directory
    pub fn on_disk(config: &StorageConfig) -> StorageResult<Self> {
        Ok(Self::new(Arc::new(FileBackend::open(config)?)))
    }

    /// Read and decode the value under `key`
    ///
    /// Returns `default` when the key is absent, the backend fails, or the
    /// stored text is not valid JSON for `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Failed to read storage key {}: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding corrupt value under {}: {}", key, e);
                default
            }
        }
    }

    /// Encode and store `value` under `key`, ignoring failures
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.backend.set(key, &raw));

        if let Err(e) = result {
            warn!("Failed to write storage key {}: {}", key, e);
        }
    }

    /// Delete `key`, ignoring failures
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!("Failed to remove storage key {}: {}", key, e);
        }
    }
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        email: String,
    }

    fn temp_config() -> StorageConfig {
        StorageConfig::new(
            std::env::temp_dir().join(format!("explorer-storage-{}", uuid::Uuid::new_v4())),
        )
    }

    /// Backend whose every operation fails
    struct BrokenBackend;

    impl KeyValueBackend for BrokenBackend {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_read_absent_key_returns_default() {
        let storage = LocalStorage::in_memory();
        let users: Vec<Record> = storage.read("auth_users", Vec::new());
        assert!(users.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let storage = LocalStorage::in_memory();
        let record = Record {
            email: "a@x.com".to_string(),
        };
        storage.write("auth_session", &record);

        let read: Option<Record> = storage.read("auth_session", None);
        assert_eq!(read, Some(record));
    }

    #[test]
    fn test_corrupt_value_reads_as_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("favorite_movies", "{not json").unwrap();
        let storage = LocalStorage::new(backend);

        let favorites: Vec<Record> = storage.read("favorite_movies", Vec::new());
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("auth_users", r#"{"email":"a@x.com"}"#).unwrap();
        let storage = LocalStorage::new(backend);

        let users: Vec<Record> = storage.read("auth_users", Vec::new());
        assert!(users.is_empty());
    }

    #[test]
    fn test_backend_failures_are_absorbed() {
        let storage = LocalStorage::new(Arc::new(BrokenBackend));
        storage.write("auth_session", &"a@x.com");
        storage.remove("auth_session");
        assert_eq!(storage.read("auth_session", 7u32), 7);
    }

    #[test]
    fn test_remove() {
        let storage = LocalStorage::in_memory();
        storage.write("auth_session", &"a@x.com");
        storage.remove("auth_session");
        storage.remove("auth_session");

        let session: Option<String> = storage.read("auth_session", None);
        assert_eq!(session, None);
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let config = temp_config();

        let first = LocalStorage::on_disk(&config).unwrap();
        first.write("tmdb_api_key", "abc123");

        let second = LocalStorage::on_disk(&config).unwrap();
        let key: Option<String> = second.read("tmdb_api_key", None);
        assert_eq!(key.as_deref(), Some("abc123"));

        fs::remove_dir_all(&config.dir).unwrap();
    }

    #[test]
    fn test_file_backend_rejects_path_like_keys() {
        let config = temp_config();
        let backend = FileBackend::open(&config).unwrap();

        assert!(matches!(
            backend.set("../escape", "1"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(backend.get(""), Err(StorageError::InvalidKey(_))));

        fs::remove_dir_all(backend.dir()).unwrap();
    }

    #[test]
    fn test_file_backend_remove_absent_key() {
        let config = temp_config();
        let backend = FileBackend::open(&config).unwrap();

        assert!(backend.remove("auth_session").is_ok());
        assert_eq!(backend.get("auth_session").unwrap(), None);

        fs::remove_dir_all(backend.dir()).unwrap();
    }
}
