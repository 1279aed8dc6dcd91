//! Daily expense route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use hotel_desk_core::ExpenseId;

use crate::db::ExpenseRepository;
use crate::error::{AppError, JsonBody};
use crate::models::DeleteRequest;
use crate::models::expense::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::routes::{CreatedResponse, DateQuery, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the expenses router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/daily_expenses",
        get(list).post(create).put(update).delete(delete),
    )
}

/// GET /api/daily_expenses?date=YYYY-MM-DD
async fn list(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ListResponse<Expense>>, AppError> {
    let date = query.date_or_today()?;
    let expenses = ExpenseRepository::new(state.pool())
        .list_for_date(date)
        .await?;
    Ok(Json(ListResponse::new(expenses)))
}

/// POST /api/daily_expenses
async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateExpenseRequest>,
) -> Result<Json<CreatedResponse<ExpenseId>>, AppError> {
    let expense = body.validate()?;
    let created = ExpenseRepository::new(state.pool()).create(&expense).await?;
    tracing::info!(expense_id = %created.id, amount = %created.amount, "Expense added");
    Ok(Json(CreatedResponse::new(
        "Expense added successfully",
        created.id,
    )))
}

/// PUT /api/daily_expenses
async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateExpenseRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (id, changes) = body.validate()?;
    ExpenseRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(AppError::not_found_as("Expense"))?;
    Ok(Json(MessageResponse::new("Expense updated successfully")))
}

/// DELETE /api/daily_expenses
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = ExpenseId::new(body.validate()?);
    ExpenseRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Expense"))?;
    Ok(Json(MessageResponse::new("Expense deleted successfully")))
}
