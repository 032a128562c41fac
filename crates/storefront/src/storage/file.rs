//! File-backed storage.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Storage, StorageError};

/// Key-value store persisted as one JSON object file.
///
/// All entries live in a single file shaped like
/// `{"credentials": "...", "user": "..."}`. Every operation re-reads the
/// file, applies its change, and rewrites through a temp-file rename so a
/// torn write cannot leave half a store behind. A missing file reads as an
/// empty store.
///
/// A process-local mutex serializes the read-modify-write cycles; the demo
/// has no cross-process writers.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    /// Create a store backed by `path`. The file is created lazily on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard.lock().await;
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.store(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.store(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn storage_in(dir: &tempfile::TempDir) -> FileStorage {
        FileStorage::new(dir.path().join("store.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert_eq!(storage.get("credentials").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        storage.set("user", r#"{"id":"1"}"#).await.unwrap();
        assert_eq!(
            storage.get("user").await.unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );

        storage.remove("user").await.unwrap();
        assert_eq!(storage.get("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::new(&path);
        storage.set("credentials", "blob").await.unwrap();
        drop(storage);

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("credentials").await.unwrap().as_deref(),
            Some("blob")
        );
    }

    #[tokio::test]
    async fn test_file_is_a_plain_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.set("a", "1").await.unwrap();
        storage.set("b", "2").await.unwrap();

        let raw = tokio::fs::read_to_string(storage.path()).await.unwrap();
        let parsed: HashMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("a").map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn test_corrupt_file_surfaces_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, b"not json at all").await.unwrap();

        let storage = FileStorage::new(&path);
        let err = storage.get("user").await.unwrap_err();
        assert!(matches!(err, StorageError::Format(_)));
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/store.json");

        let storage = FileStorage::new(&path);
        storage.set("k", "v").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
