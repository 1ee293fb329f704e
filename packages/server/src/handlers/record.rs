use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::form::FormData;
use crate::models::record::{
    CreatedResponse, DataResponse, INVALID_INPUT, MessageResponse, RecordView, current_image,
    parse_fields, parse_id,
};
use crate::records::{RecordKind, RecordService};
use crate::state::AppState;

fn service<K: RecordKind>(state: &AppState) -> RecordService<'_, DatabaseConnection> {
    RecordService::new(&state.db, K::SCHEMA, &state.images)
}

#[instrument(skip(state), fields(table = K::SCHEMA.table))]
pub async fn list_records<K: RecordKind>(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<RecordView>>>, AppError> {
    let records = service::<K>(&state).list().await?;
    let data = records
        .into_iter()
        .map(|record| RecordView {
            schema: K::SCHEMA,
            record,
        })
        .collect();
    Ok(Json(DataResponse::new(data)))
}

#[instrument(skip(state), fields(table = K::SCHEMA.table))]
pub async fn get_record<K: RecordKind>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<RecordView>>, AppError> {
    let schema = K::SCHEMA;
    let id = id
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation(format!("Valid {} is required.", schema.id_column)))?;

    let record = service::<K>(&state)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", schema.label)))?;
    Ok(Json(DataResponse::new(RecordView { schema, record })))
}

#[instrument(skip(state, form), fields(table = K::SCHEMA.table))]
pub async fn create_record<K: RecordKind>(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Json<CreatedResponse>, AppError> {
    let schema = K::SCHEMA;
    let fields = parse_fields(schema, &form)?;

    let id = service::<K>(&state)
        .create(&fields, form.file(schema.upload_field))
        .await?;
    Ok(Json(CreatedResponse { schema, id }))
}

#[instrument(skip(state, form), fields(table = K::SCHEMA.table))]
pub async fn update_record<K: RecordKind>(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Json<MessageResponse>, AppError> {
    let schema = K::SCHEMA;
    let id = parse_id(schema, &form).ok_or_else(|| AppError::Validation(INVALID_INPUT.into()))?;
    let fields = parse_fields(schema, &form)?;

    let rows = service::<K>(&state)
        .update(
            id,
            &fields,
            form.file(schema.upload_field),
            current_image(schema, &form),
        )
        .await?;

    // A miss is reported in the body, not the status.
    if rows > 0 {
        Ok(Json(MessageResponse::ok(format!(
            "{} updated successfully",
            schema.label
        ))))
    } else {
        Ok(Json(MessageResponse::failed(format!(
            "No changes were made or {} not found.",
            schema.noun()
        ))))
    }
}

#[instrument(skip(state, form), fields(table = K::SCHEMA.table))]
pub async fn delete_record<K: RecordKind>(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Json<MessageResponse>, AppError> {
    let schema = K::SCHEMA;
    let id = parse_id(schema, &form)
        .ok_or_else(|| AppError::Validation(format!("Valid {} is required.", schema.id_column)))?;

    if service::<K>(&state).delete(id).await? {
        Ok(Json(MessageResponse::ok(format!(
            "{} deleted successfully.",
            schema.label
        ))))
    } else {
        Err(AppError::NotFound(format!(
            "{} not found or could not be deleted.",
            schema.label
        )))
    }
}
