use common::media::ImageError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
