//! Worker attendance route handlers, single and bulk.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde_json::Value;

use hotel_desk_core::AttendanceId;

use crate::db::AttendanceRepository;
use crate::db::attendance::MarkOutcome;
use crate::error::{AppError, JsonBody};
use crate::models::attendance::{AttendanceRecord, MarkAttendanceRequest, validate_batch};
use crate::models::{DeleteRequest, ValidationError};
use crate::routes::{BulkResponse, DateQuery, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the attendance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/attendance", get(list).post(mark).delete(delete))
        .route("/api/worker_attendance", post(mark_bulk))
}

/// GET /api/attendance?date=YYYY-MM-DD
async fn list(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ListResponse<AttendanceRecord>>, AppError> {
    let date = query.date_or_today()?;
    let records = AttendanceRepository::new(state.pool())
        .list_for_date(date)
        .await?;
    Ok(Json(ListResponse::new(records)))
}

/// Mark one worker for one day, replacing any earlier mark.
///
/// POST /api/attendance
async fn mark(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<MarkAttendanceRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let mark = body.validate()?;
    let (_, outcome) = AttendanceRepository::new(state.pool()).mark(&mark).await?;

    let message = match outcome {
        MarkOutcome::Created => "Attendance marked successfully",
        MarkOutcome::Replaced => "Attendance updated successfully",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Save a whole day's roll call. Every record is validated before anything is
/// written.
///
/// POST /api/worker_attendance
#[tracing::instrument(skip_all)]
async fn mark_bulk(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<BulkResponse>, AppError> {
    if !body.is_array() {
        return Err(
            ValidationError::Malformed("Attendance data must be an array".to_string()).into(),
        );
    }
    let entries: Vec<MarkAttendanceRequest> = serde_json::from_value(body)
        .map_err(|e| ValidationError::Malformed(format!("Invalid attendance record: {e}")))?;
    let marks = validate_batch(entries)?;

    let saved = AttendanceRepository::new(state.pool())
        .mark_many(&marks)
        .await?;
    tracing::info!(saved, "Bulk attendance saved");

    Ok(Json(BulkResponse::new("Attendance", saved)))
}

/// DELETE /api/attendance
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = AttendanceId::new(body.validate()?);
    AttendanceRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Attendance record"))?;
    Ok(Json(MessageResponse::new("Attendance deleted successfully")))
}
