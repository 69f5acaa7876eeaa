//! Key/value persistence adapter for store slices
//!
//! Provides storage backends for persisted slice snapshots:
//! - In-memory (lost on restart, used by tests)
//! - File-based (one JSON file per key)
//!
//! Backends report failures through [`StorageError`]. The store never talks to
//! a backend directly; it goes through [`SafeStorage`], which turns every
//! failure into a no-op so a broken disk degrades to session-only state.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {size} bytes over limit of {limit}")]
    QuotaExceeded { size: usize, limit: usize },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Generic get/set/remove-by-key facility
pub trait KeyValueStorage: Send + Sync {
    /// Stored value, or `None` when the key was never written
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Which backend holds persisted slices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => f.write_str("memory"),
            StorageBackend::File => f.write_str("file"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Create a storage backend from configuration
pub fn create_storage(
    backend: StorageBackend,
    data_dir: impl AsRef<Path>,
) -> StorageResult<Arc<dyn KeyValueStorage>> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::File => Ok(Arc::new(FileStorage::new(data_dir.as_ref())?)),
    }
}

/// Failure-swallowing view over a [`KeyValueStorage`].
///
/// `get` yields `None` on failure, `set` and `remove` ignore failures.
/// Every swallowed failure is logged at warn level.
#[derive(Clone)]
pub struct SafeStorage {
    inner: Arc<dyn KeyValueStorage>,
}

impl SafeStorage {
    pub fn new(inner: Arc<dyn KeyValueStorage>) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.inner.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from storage");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.inner.set_item(key, value) {
            warn!(key, error = %e, "Failed to write to storage");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.inner.remove_item(key) {
            warn!(key, error = %e, "Failed to remove from storage");
        }
    }
}

impl fmt::Debug for SafeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeStorage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set_item(&self, _key: &str, value: &str) -> StorageResult<()> {
            Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit: 0,
            })
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    #[test]
    fn test_safe_storage_swallows_failures() {
        let storage = SafeStorage::new(Arc::new(BrokenStorage));
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v");
        storage.remove("k");
    }

    #[test]
    fn test_safe_storage_passes_values_through() {
        let storage = SafeStorage::new(Arc::new(MemoryStorage::new()));
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        storage.remove("k");
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_create_memory_storage() {
        let storage = create_storage(StorageBackend::Memory, "/nonexistent").unwrap();
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
    }
}
