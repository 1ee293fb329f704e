use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::traits::BlobStore;
use crate::filename::validate_flat_filename;

/// Filesystem-backed blob store.
///
/// Blobs live flat under `base_path` by name. Writes are staged in
/// `{base_path}/.tmp` and renamed into place, so readers never observe a
/// partially written file.
pub struct FilesystemBlobStore {
    base_path: PathBuf,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store, creating its directories if needed.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    /// Compute the filesystem path for a blob name.
    fn blob_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let name = validate_flat_filename(name)?;
        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let blob_path = self.blob_path(name)?;

        // The upload directory may have been removed since startup.
        fs::create_dir_all(self.base_path.join(".tmp")).await?;

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &blob_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let blob_path = self.blob_path(name)?;
        match fs::read(&blob_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let blob_path = self.blob_path(name)?;
        match fs::remove_file(&blob_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
