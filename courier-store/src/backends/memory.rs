use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use courier_common::StorageLocator;

use crate::{StoreError, r#trait::BlobStore};

/// In-memory blob store.
///
/// Stores objects in a `HashMap` protected by an `RwLock`. Primarily intended
/// for testing, but usable for transient message handling.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<HashMap<StorageLocator, Arc<[u8]>>>>,
}

impl MemoryBlobStore {
    /// Create a new empty memory-backed store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, replacing any previous bytes at the same locator.
    ///
    /// # Errors
    /// Returns an error if the lock is poisoned.
    pub fn insert(
        &self,
        locator: StorageLocator,
        bytes: impl Into<Arc<[u8]>>,
    ) -> crate::Result<()> {
        self.objects.write()?.insert(locator, bytes.into());
        Ok(())
    }

    /// Number of stored objects.
    ///
    /// Recovers gracefully if the lock is poisoned by accessing the underlying data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn fetch(&self, locator: &StorageLocator) -> crate::Result<Vec<u8>> {
        self.objects
            .read()?
            .get(locator)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| StoreError::NotFound(locator.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_roundtrip() {
        let store = MemoryBlobStore::new();
        let locator = StorageLocator::new("reports", "daily.eml");
        store
            .insert(locator.clone(), b"To: a@x.com\r\n\r\nbody".as_slice())
            .unwrap();

        let bytes = store.fetch(&locator).await.unwrap();
        assert_eq!(bytes, b"To: a@x.com\r\n\r\nbody");
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let store = MemoryBlobStore::new();
        let locator = StorageLocator::new("reports", "missing.eml");

        let err = store.fetch(&locator).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
