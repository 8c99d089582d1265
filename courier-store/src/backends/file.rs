use std::path::PathBuf;

use async_trait::async_trait;
use courier_common::StorageLocator;
use tracing::trace;

use crate::{StoreError, r#trait::BlobStore};

/// Directory-backed blob store.
///
/// Objects live under `root/<container>/<key>`; the key may itself contain
/// subdirectories. Locators are validated before path resolution so a
/// malicious key cannot escape the root.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this store resolves locators under.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, locator: &StorageLocator) -> crate::Result<PathBuf> {
        if !locator.is_path_safe() {
            return Err(StoreError::InvalidLocator(locator.clone()));
        }

        Ok(self.root.join(&locator.container).join(&locator.key))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn fetch(&self, locator: &StorageLocator) -> crate::Result<Vec<u8>> {
        let path = self.resolve(locator)?;

        trace!(locator = %locator, path = %path.display(), "Fetching object");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(locator.clone()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_reads_object_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let container = dir.path().join("reports");
        std::fs::create_dir_all(&container).unwrap();
        std::fs::write(container.join("daily.eml"), b"raw message").unwrap();

        let store = FileBlobStore::new(dir.path());
        let bytes = store
            .fetch(&StorageLocator::new("reports", "daily.eml"))
            .await
            .unwrap();

        assert_eq!(bytes, b"raw message");
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());

        let err = store
            .fetch(&StorageLocator::new("reports", "missing.eml"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());

        let err = store
            .fetch(&StorageLocator::new("reports", "../../etc/passwd"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidLocator(_)));
    }
}
