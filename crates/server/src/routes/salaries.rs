//! Worker salary route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;

use hotel_desk_core::SalaryId;

use crate::db::SalaryRepository;
use crate::error::{AppError, JsonBody};
use crate::models::salary::{
    CreateSalaryRequest, SalaryRecord, UpdateSalaryRequest, validate_batch,
};
use crate::models::{DeleteRequest, ValidationError};
use crate::routes::{BulkResponse, CreatedResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the salary router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/worker_salary",
        get(list).post(create).put(update).delete(delete),
    )
}

/// `?month=` filter on `month_year`.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// GET /api/worker_salary?month=...
async fn list(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ListResponse<SalaryRecord>>, AppError> {
    let month = query.month.as_deref().map(str::trim).filter(|m| !m.is_empty());
    let records = SalaryRepository::new(state.pool()).list(month).await?;
    Ok(Json(ListResponse::new(records)))
}

/// Create one statement, or a batch when the body is an array.
///
/// POST /api/worker_salary
#[tracing::instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Response, AppError> {
    let repo = SalaryRepository::new(state.pool());

    if body.is_array() {
        let entries: Vec<CreateSalaryRequest> = serde_json::from_value(body)
            .map_err(|e| ValidationError::Malformed(format!("Invalid salary record: {e}")))?;
        let salaries = validate_batch(entries)?;
        let inserted = repo.create_many(&salaries).await?;
        tracing::info!(inserted, "Bulk salary records saved");
        return Ok(Json(BulkResponse::new("Salary records", inserted)).into_response());
    }

    let entry: CreateSalaryRequest = serde_json::from_value(body)
        .map_err(|e| ValidationError::Malformed(format!("Invalid salary record: {e}")))?;
    let created = repo.create(&entry.validate()?).await?;
    Ok(Json(CreatedResponse::new(
        "Salary record added successfully",
        created.id,
    ))
    .into_response())
}

/// PUT /api/worker_salary
async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateSalaryRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (id, changes) = body.validate()?;
    SalaryRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(AppError::not_found_as("Salary record"))?;
    Ok(Json(MessageResponse::new("Salary record updated successfully")))
}

/// DELETE /api/worker_salary
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = SalaryId::new(body.validate()?);
    SalaryRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Salary record"))?;
    Ok(Json(MessageResponse::new("Salary record deleted successfully")))
}
