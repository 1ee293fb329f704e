use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::ImageError;
use super::probe::{ImageInfo, probe};
use crate::filename::{extension, sanitize_basename, validate_flat_filename};
use crate::storage::{BlobStore, StorageError};

/// Upload size cap applied when no other limit is configured (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted on uploaded filenames, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Image bytes ready to be served.
#[derive(Debug)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    /// Taken from content sniffing, never from the filename.
    pub mime_type: &'static str,
}

/// Validates uploaded images and keeps them in a [`BlobStore`].
pub struct ImageIngestor {
    store: Arc<dyn BlobStore>,
    max_bytes: u64,
}

impl ImageIngestor {
    pub fn new(store: Arc<dyn BlobStore>, max_bytes: u64) -> Self {
        Self { store, max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Run the validation pipeline without storing anything.
    ///
    /// Checks run in a fixed order and stop at the first failure: content
    /// must decode as an image, then the size limit, then the extension of
    /// `original_name`.
    pub fn validate(&self, original_name: &str, data: &[u8]) -> Result<ImageInfo, ImageError> {
        let info = probe(data).ok_or(ImageError::InvalidImage)?;

        let size = data.len() as u64;
        if size > self.max_bytes {
            return Err(ImageError::FileTooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let ext = extension(original_name).unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImageError::UnsupportedFormat(ext));
        }

        Ok(info)
    }

    /// Validate an upload and persist it under a freshly generated name.
    ///
    /// Returns the stored filename only; the storage location stays private.
    /// Nothing is written when validation fails.
    pub async fn ingest(&self, original_name: &str, data: &[u8]) -> Result<String, ImageError> {
        let info = match self.validate(original_name, data) {
            Ok(info) => info,
            Err(e) => {
                warn!(original_name, size = data.len(), error = %e, "Rejected image upload");
                return Err(e);
            }
        };

        let filename = generate_filename(original_name);
        self.store
            .put(&filename, data)
            .await
            .map_err(|e| {
                warn!(filename = %filename, error = %e, "Failed to store image");
                ImageError::WriteFailure(e)
            })?;

        info!(
            filename = %filename,
            size = data.len(),
            mime = info.mime_type(),
            width = info.width,
            height = info.height,
            "Stored image"
        );
        Ok(filename)
    }

    /// Delete a stored image. A missing file yields `Ok(false)`.
    pub async fn remove(&self, filename: &str) -> Result<bool, StorageError> {
        let removed = self.store.delete(filename).await?;
        debug!(filename, removed, "Removed image");
        Ok(removed)
    }

    /// Look up a stored image for serving.
    ///
    /// Names that are not a direct child of the store, missing files and
    /// files that no longer decode as images all report `NotFound`.
    pub async fn resolve(&self, filename: &str) -> Result<ResolvedImage, ImageError> {
        if validate_flat_filename(filename).is_err() {
            return Err(ImageError::NotFound(filename.to_string()));
        }

        let bytes = match self.store.get(filename).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(_) | StorageError::InvalidName(_)) => {
                return Err(ImageError::NotFound(filename.to_string()));
            }
            Err(e) => return Err(ImageError::ReadFailure(e)),
        };

        let info = probe(&bytes).ok_or_else(|| ImageError::NotFound(filename.to_string()))?;
        Ok(ResolvedImage {
            bytes,
            mime_type: info.mime_type(),
        })
    }
}

/// Longest stored filename, matching common filesystem limits and the width
/// of the image columns.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Build a stored filename as `<token>_<sanitized basename>`.
///
/// The token is the simple form of a UUIDv7, a millisecond timestamp followed
/// by random bits, so concurrent uploads of the same name do not collide.
/// Long basenames are shortened to keep the result within
/// [`MAX_FILENAME_BYTES`], preserving the extension.
pub fn generate_filename(original_name: &str) -> String {
    let token = Uuid::now_v7().simple().to_string();
    let budget = MAX_FILENAME_BYTES - token.len() - 1;
    format!(
        "{token}_{}",
        truncate_basename(sanitize_basename(original_name), budget)
    )
}

/// Cut `name` to at most `max` bytes, keeping a short extension intact.
///
/// `name` must be ASCII, which [`sanitize_basename`] guarantees.
fn truncate_basename(name: String, max: usize) -> String {
    if name.len() <= max {
        return name;
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if name.len() - dot < max => name.split_at(dot),
        _ => (name.as_str(), ""),
    };
    // A cut right after a dot would leave ".." in front of the extension.
    let stem = stem[..max - ext.len()].trim_end_matches('.');
    format!("{stem}{ext}")
}
