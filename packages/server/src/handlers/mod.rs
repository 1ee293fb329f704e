pub mod health;
pub mod image;
pub mod record;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Fallback for methods a route does not serve. Bare `OPTIONS` requests get
/// an empty 204.
pub async fn method_not_allowed(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        AppError::MethodNotAllowed(method).into_response()
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}
