//! Persistence backends for the link index
//!
//! The store hands the whole index to [`LinkPersistence::save`] on every new
//! link and reads it back once through [`LinkPersistence::load`].

use crate::error::PersistError;
use crate::index::LinkIndex;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage for a [`LinkIndex`] blob
#[async_trait]
pub trait LinkPersistence: Send + Sync + Debug {
    /// Read the stored index
    ///
    /// `Ok(None)` means nothing has been stored yet.
    async fn load(&self) -> Result<Option<LinkIndex>, PersistError>;

    /// Replace the stored index with `index` as one unit
    async fn save(&self, index: &LinkIndex) -> Result<(), PersistError>;
}

/// JSON file backend
///
/// Writes go to a sibling `*.tmp` file which is then renamed over the target,
/// so readers of the file see either the old or the new blob.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Create backend for file at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LinkPersistence for JsonFilePersistence {
    async fn load(&self) -> Result<Option<LinkIndex>, PersistError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistError::io_error(&self.path, e)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PersistError::corrupt(&self.path, e))
    }

    async fn save(&self, index: &LinkIndex) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistError::io_error(parent, e))?;
        }

        let json = serde_json::to_vec(index)?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PersistError::io_error(&tmp, e))?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(PersistError::io_error(&self.path, e));
        }

        tracing::debug!("Saved {} short links to {}", index.len(), self.path.display());
        Ok(())
    }
}

/// In-memory backend
///
/// Useful for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    stored: Mutex<Option<LinkIndex>>,
}

impl MemoryPersistence {
    /// Create empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create backend pre-seeded with `index`
    #[inline]
    #[must_use]
    pub fn with_index(index: LinkIndex) -> Self {
        Self {
            stored: Mutex::new(Some(index)),
        }
    }

    /// Copy of the last saved index
    #[must_use]
    pub fn snapshot(&self) -> Option<LinkIndex> {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl LinkPersistence for MemoryPersistence {
    async fn load(&self) -> Result<Option<LinkIndex>, PersistError> {
        Ok(self.stored.lock().clone())
    }

    async fn save(&self, index: &LinkIndex) -> Result<(), PersistError> {
        *self.stored.lock() = Some(index.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> LinkIndex {
        let mut index = LinkIndex::new();
        index.insert("abc12345", "PN:v1/96/A1:x");
        index
    }

    #[test]
    fn tmp_path_is_sibling() {
        let backend = JsonFilePersistence::new("data/short-links.json");
        assert_eq!(backend.tmp_path(), PathBuf::from("data/short-links.json.tmp"));
    }

    #[tokio::test]
    async fn memory_roundtrip() {
        let backend = MemoryPersistence::new();
        assert!(backend.load().await.unwrap().is_none());

        backend.save(&sample_index()).await.unwrap();
        assert_eq!(backend.load().await.unwrap(), Some(sample_index()));
        assert_eq!(backend.snapshot(), Some(sample_index()));
    }

    #[tokio::test]
    async fn file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path().join("absent.json"));
        assert!(backend.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_save_creates_parents_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/short-links.json");
        let backend = JsonFilePersistence::new(&path);

        backend.save(&sample_index()).await.unwrap();
        assert!(path.exists());
        assert!(!backend.tmp_path().exists());

        let reloaded = JsonFilePersistence::new(&path).load().await.unwrap();
        assert_eq!(reloaded, Some(sample_index()));
    }

    #[tokio::test]
    async fn file_corrupt_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short-links.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFilePersistence::new(&path).load().await.unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn file_save_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let backend = JsonFilePersistence::new(blocker.join("short-links.json"));
        let err = backend.save(&sample_index()).await.unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }
}
