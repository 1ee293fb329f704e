use thiserror::Error;

use crate::storage::StorageError;

/// Failures of the image upload and read paths.
///
/// Display strings are shown to API clients as-is.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Content does not decode as a supported raster image.
    #[error("File is not an image.")]
    InvalidImage,

    #[error("Sorry, your file is too large. Max {}MB.", .limit / (1024 * 1024))]
    FileTooLarge { size: u64, limit: u64 },

    /// Extension outside the allowed set. Carries the offending extension
    /// (empty when the name had none).
    #[error("Sorry, only JPG, JPEG, PNG & GIF files are allowed.")]
    UnsupportedFormat(String),

    #[error("Sorry, there was an error uploading your file.")]
    WriteFailure(#[source] StorageError),

    #[error("Image not found")]
    NotFound(String),

    #[error("Image storage is unavailable")]
    ReadFailure(#[source] StorageError),
}
