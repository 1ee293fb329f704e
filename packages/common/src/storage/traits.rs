use async_trait::async_trait;

use super::error::StorageError;

/// Name-addressed blob storage.
///
/// Names are flat filenames; implementations must refuse anything that would
/// escape their root.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `name`, replacing any existing blob.
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes of a blob.
    async fn get(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it did not exist.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;
}
