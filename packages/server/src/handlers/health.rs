use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::models::record::MessageResponse;
use crate::state::AppState;

/// Report whether the database answers.
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    state.db.ping().await?;
    Ok(Json(MessageResponse::ok("Database connection successful!")))
}
