use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use sf_core::ports::{KeyValueStoragePort, StorageError};

type Entries = BTreeMap<String, String>;

/// Stores every key in a single JSON object file.
///
/// A missing or empty file reads as an empty store. Writes go through a
/// temporary sibling file and a rename, so a crash leaves either the old or
/// the new contents on disk. The mutex serializes read-modify-write cycles
/// within one process.
pub struct FileKeyValueStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::Io(format!("create storage dir failed: {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "read storage failed: {}: {e}",
                    self.path.display()
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupt(format!("parse storage failed: {}: {e}", self.path.display()))
        })
    }

    /// Entries to base a write on. A corrupt file is replaced rather than
    /// blocking every later write.
    async fn entries_for_write(&self) -> Result<Entries, StorageError> {
        match self.read_entries().await {
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "overwriting corrupt storage file");
                Ok(Entries::new())
            }
            other => other,
        }
    }

    async fn atomic_write(&self, entries: &Entries) -> Result<(), StorageError> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupt(format!("serialize storage failed: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await.map_err(|e| {
            StorageError::Io(format!(
                "write temp storage failed: {}: {e}",
                tmp_path.display()
            ))
        })?;

        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            StorageError::Io(format!(
                "rename temp storage failed: {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl KeyValueStoragePort for FileKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.atomic_write(&entries).await?;
        debug!(key, path = %self.path.display(), "storage key written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries_for_write().await?;
        if entries.remove(key).is_some() {
            self.atomic_write(&entries).await?;
            debug!(key, path = %self.path.display(), "storage key removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path().join("session.json"));

        assert_eq!(storage.get("auth.token").await.unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn empty_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "  \n").unwrap();

        let storage = FileKeyValueStorage::new(path);
        assert_eq!(storage.get("auth.token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_creates_parent_dirs_and_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");

        let storage = FileKeyValueStorage::new(path.clone());
        storage.set("auth.isSignedUp", "true").await.unwrap();
        storage.set("auth.token", "\"abc\"").await.unwrap();

        let reopened = FileKeyValueStorage::new(path.clone());
        assert_eq!(
            reopened.get("auth.isSignedUp").await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            reopened.get("auth.token").await.unwrap().as_deref(),
            Some("\"abc\"")
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn remove_deletes_only_that_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path().join("session.json"));
        storage.set("a", "1").await.unwrap();
        storage.set("b", "2").await.unwrap();

        storage.remove("a").await.unwrap();
        storage.remove("missing").await.unwrap();

        assert_eq!(storage.get("a").await.unwrap(), None);
        assert_eq!(storage.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileKeyValueStorage::new(path);
        let err = storage.get("auth.user").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[tokio::test]
    async fn write_replaces_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileKeyValueStorage::new(path);
        storage.set("auth.isSignedUp", "false").await.unwrap();

        assert_eq!(
            storage.get("auth.isSignedUp").await.unwrap().as_deref(),
            Some("false")
        );
    }
}
