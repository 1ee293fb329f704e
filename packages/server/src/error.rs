use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use common::media::ImageError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::records::RecordError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Always `false`, so clients can branch on `success` alone.
    pub success: bool,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `METHOD_NOT_ALLOWED`, `IMAGE_ERROR`, `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

impl ErrorBody {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
        }
    }
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    MethodNotAllowed(Method),
    Image(ImageError),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new("NOT_FOUND", msg)),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody::new(
                    "METHOD_NOT_ALLOWED",
                    format!("Invalid request method. Received: {method}"),
                ),
            ),
            AppError::Image(err @ ImageError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NOT_FOUND", err.to_string()),
            ),
            AppError::Image(err) => {
                match &err {
                    ImageError::WriteFailure(source) | ImageError::ReadFailure(source) => {
                        tracing::error!("Image storage error: {}", source);
                    }
                    _ => tracing::warn!("Image rejected: {}", err),
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("IMAGE_ERROR", err.to_string()),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "An unexpected error occurred"),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        AppError::Image(err)
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(msg) => AppError::Validation(msg),
            RecordError::Image(e) => AppError::Image(e),
            RecordError::Database(e) => e.into(),
        }
    }
}
