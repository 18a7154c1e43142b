//! Key-value blob persistence.
//!
//! The task store keeps its whole state in one named blob. `BlobStore` is the
//! seam between the store and where the bytes live: a directory of JSON files
//! for the desktop app, or a map in memory for tests and demos.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to deserialize tasks: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Named string blobs.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per blob inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, or the working directory when none exists
    pub fn default_dir() -> PathBuf {
        match ProjectDirs::from("com", "TaskCalendar", "TaskCalendar") {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => {
                log::warn!("No platform data directory available, storing tasks in working directory");
                PathBuf::from(".")
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_stem))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Io { path, source })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }
}

/// In-memory blobs, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.into(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path().join("nested"));

        assert_eq!(store.read("calendar-tasks").unwrap(), None);
        store.write("calendar-tasks", "[]").unwrap();
        assert_eq!(store.read("calendar-tasks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_sanitizes_keys() {
        let store = FileBlobStore::new("/data");
        let path = store.path_for("../tasks v2");
        assert_eq!(path, PathBuf::from("/data").join("___tasks_v2.json"));
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryBlobStore::new();
        store.write("k", "v").unwrap();
        assert_eq!(store.get("k"), Some("v"));
        assert_eq!(store.read("missing").unwrap(), None);
    }
}
