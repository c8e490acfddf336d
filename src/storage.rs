use crate::errors::{Result, TrackerError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};

/// String key-value storage in the style of a browser's local storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces any prior value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// Key-value store backed by a single JSON object on disk.
///
/// The file is read once on open and rewritten in full after every change.
/// When a write fails the change is still kept in memory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        debug!(path = %path.display(), keys = entries.len(), "opened key-value file");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_vec_pretty(&self.entries).map_err(TrackerError::storage)?;
        std::fs::write(&self.path, payload).map_err(|err| {
            TrackerError::storage(format!("writing {}: {err}", self.path.display()))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist()
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

/// In-memory store, used in tests. An unavailable store fails every call.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: BTreeMap::new(),
            unavailable: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(TrackerError::storage("store is disabled"));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path).await;
        store.set("lastReminder", "1700000000000").unwrap();
        store.set("other", "x").unwrap();
        store.delete("other").unwrap();

        let reopened = FileStore::open(&path).await;
        assert_eq!(
            reopened.get("lastReminder").unwrap().as_deref(),
            Some("1700000000000")
        );
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileStore::open(&path).await;
        assert_eq!(store.get("pythonAIProgress").unwrap(), None);
    }

    #[tokio::test]
    async fn failed_write_keeps_value_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("state.json");

        let mut store = FileStore::open(&path).await;
        let err = store.set("key", "value").unwrap_err();
        assert!(matches!(err, TrackerError::StorageUnavailable { .. }));
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn deleting_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        store.delete("absent").unwrap();
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn unavailable_store_rejects_everything() {
        let mut store = MemoryStore::unavailable();
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert!(store.delete("k").is_err());
    }
}
