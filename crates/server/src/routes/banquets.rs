//! Banquet booking route handlers.

use axum::{Json, Router, extract::State, routing::get};

use hotel_desk_core::BookingId;

use crate::db::BookingRepository;
use crate::error::{AppError, JsonBody};
use crate::models::DeleteRequest;
use crate::models::banquet::{Booking, CreateBookingRequest, UpdateBookingRequest};
use crate::routes::{CreatedResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the banquet router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/banquet_management",
        get(list).post(create).put(update).delete(delete),
    )
}

/// GET /api/banquet_management
async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<Booking>>, AppError> {
    let bookings = BookingRepository::new(state.pool()).list_all().await?;
    Ok(Json(ListResponse::new(bookings)))
}

/// POST /api/banquet_management
async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateBookingRequest>,
) -> Result<Json<CreatedResponse<BookingId>>, AppError> {
    let booking = body.validate()?;
    let created = BookingRepository::new(state.pool()).create(&booking).await?;
    tracing::info!(
        booking_id = %created.id,
        event_date = %created.event_date,
        status = %created.booking_status,
        "Banquet booking added"
    );
    Ok(Json(CreatedResponse::new(
        "Banquet booking added successfully",
        created.id,
    )))
}

/// PUT /api/banquet_management
async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateBookingRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (id, changes) = body.validate()?;
    BookingRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(AppError::not_found_as("Banquet booking"))?;
    Ok(Json(MessageResponse::new(
        "Banquet booking updated successfully",
    )))
}

/// DELETE /api/banquet_management
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = BookingId::new(body.validate()?);
    BookingRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Banquet booking"))?;
    Ok(Json(MessageResponse::new(
        "Banquet booking deleted successfully",
    )))
}
