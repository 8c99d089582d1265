use async_trait::async_trait;
use courier_common::StorageLocator;

/// Read-side contract for the message store.
///
/// The relay only ever fetches; writes are the upstream receiver's concern.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the raw bytes stored at `locator`.
    ///
    /// # Errors
    /// Returns a [`crate::StoreError`] if the object does not exist or the
    /// transport fails. Callers treat every variant as fatal.
    async fn fetch(&self, locator: &StorageLocator) -> crate::Result<Vec<u8>>;
}
