use thiserror::Error;

use crate::filename::FilenameError;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested blob was not found.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// The blob name is not a flat filename.
    #[error("invalid blob name: {0}")]
    InvalidName(#[from] FilenameError),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
