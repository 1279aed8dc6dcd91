//! Worker roster route handlers.

use axum::{Json, Router, extract::State, routing::get};

use hotel_desk_core::WorkerId;

use crate::db::WorkerRepository;
use crate::error::{AppError, JsonBody};
use crate::models::DeleteRequest;
use crate::models::worker::{CreateWorkerRequest, UpdateWorkerRequest, Worker};
use crate::routes::{CreatedResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the workers router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/workers",
        get(list).post(create).put(update).delete(delete),
    )
}

/// GET /api/workers
async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<Worker>>, AppError> {
    let workers = WorkerRepository::new(state.pool()).list_all().await?;
    Ok(Json(ListResponse::new(workers)))
}

/// POST /api/workers
async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateWorkerRequest>,
) -> Result<Json<CreatedResponse<WorkerId>>, AppError> {
    let worker = body.validate()?;
    let created = WorkerRepository::new(state.pool()).create(&worker).await?;
    tracing::info!(worker_id = %created.id, "Worker added");
    Ok(Json(CreatedResponse::new(
        "Worker added successfully",
        created.id,
    )))
}

/// PUT /api/workers
async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateWorkerRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (id, changes) = body.validate()?;
    WorkerRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(AppError::not_found_as("Worker"))?;
    Ok(Json(MessageResponse::new("Worker updated successfully")))
}

/// DELETE /api/workers
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = WorkerId::new(body.validate()?);
    WorkerRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Worker"))?;
    Ok(Json(MessageResponse::new("Worker deleted successfully")))
}
