//! Restaurant order route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Serialize;

use hotel_desk_core::OrderNumber;

use crate::db::OrderRepository;
use crate::error::{AppError, JsonBody};
use crate::models::order::{CreateOrderRequest, DeleteOrderRequest, Order, UpdateOrderRequest};
use crate::routes::{DateQuery, ListResponse, MessageResponse};
use crate::services::SequenceGenerator;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/orders",
        get(list).post(create).put(update).delete(delete),
    )
}

/// `{"success": true, "message": "...", "order_id": "00000042"}`
#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub order_id: OrderNumber,
}

/// Orders for a day, newest first.
///
/// GET /api/orders?date=YYYY-MM-DD
async fn list(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ListResponse<Order>>, AppError> {
    let date = query.date_or_today()?;
    let orders = OrderRepository::new(state.pool()).list_for_date(date).await?;
    Ok(Json(ListResponse::new(orders)))
}

/// Validate, mint an order number, then insert.
///
/// A failed insert leaves a gap in the sequence.
///
/// POST /api/orders
#[tracing::instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateOrderRequest>,
) -> Result<Json<OrderCreatedResponse>, AppError> {
    let order = body.validate()?;

    let order_id = SequenceGenerator::for_pool(state.pool()).next().await?;
    let created = OrderRepository::new(state.pool())
        .create(order_id, &order)
        .await?;

    tracing::info!(
        order_id = %created.order_id,
        total_amount = %created.total_amount,
        "Order created"
    );

    Ok(Json(OrderCreatedResponse {
        success: true,
        message: "Order created successfully",
        order_id,
    }))
}

/// PUT /api/orders
async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateOrderRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (order_id, changes) = body.validate()?;
    OrderRepository::new(state.pool())
        .update_by_number(order_id, &changes)
        .await
        .map_err(AppError::not_found_as("Order"))?;
    Ok(Json(MessageResponse::new("Order updated successfully")))
}

/// DELETE /api/orders
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteOrderRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let order_id = body.validate()?;
    OrderRepository::new(state.pool())
        .delete_by_number(order_id)
        .await
        .map_err(AppError::not_found_as("Order"))?;
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
