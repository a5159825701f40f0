//! Durable storage backing the file routes.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

/// Reads and writes named entries below a root directory.
///
/// Names are joined onto the root verbatim. The store performs no name
/// sanitization; callers decide which names reach it.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the full contents of the named entry.
    ///
    /// Every failure to produce the bytes reports as [`StoreError::NotFound`];
    /// causes other than a missing entry are logged before being folded in.
    pub async fn read(&self, name: &str) -> Result<Bytes, StoreError> {
        let path = self.root.join(name);
        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(Bytes::from(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::not_found(name)),
            Err(e) => {
                warn!(name, cause = %e, "read failed, treating entry as absent");
                Err(StoreError::not_found(name))
            }
        }
    }

    /// Writes the contents to the named entry, replacing any previous contents.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), StoreError> {
        let path = self.root.join(name);
        tokio::fs::write(&path, contents).await?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no entry named {name}")]
    NotFound { name: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StoreError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn written_contents_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("note.txt", b"first").await.unwrap();

        assert_eq!(store.read("note.txt").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn writing_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("note.txt", b"a longer first version").await.unwrap();
        store.write("note.txt", b"short").await.unwrap();

        assert_eq!(store.read("note.txt").await.unwrap(), "short");
    }

    #[tokio::test]
    async fn missing_entry_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.read("absent").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
