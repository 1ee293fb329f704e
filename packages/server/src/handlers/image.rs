use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub file: Option<String>,
}

/// Stream a stored image with the MIME type sniffed from its content.
#[instrument(skip(state))]
pub async fn serve_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let file = query
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::NotFound("File not found".into()))?;

    let image = state.images.resolve(&file).await?;
    Ok(([(header::CONTENT_TYPE, image.mime_type)], image.bytes))
}
