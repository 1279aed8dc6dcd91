//! Daily thali menu route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use hotel_desk_core::ThaliMenuId;

use crate::db::ThaliMenuRepository;
use crate::db::attendance::MarkOutcome;
use crate::error::{AppError, JsonBody};
use crate::models::DeleteRequest;
use crate::models::menu::{SaveThaliMenuRequest, ThaliMenu};
use crate::routes::{DateQuery, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the thali menu router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/thali_menu", get(list).post(save).delete(delete))
}

/// GET /api/thali_menu?date=YYYY-MM-DD
async fn list(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ListResponse<ThaliMenu>>, AppError> {
    let date = query.date_or_today()?;
    let menus = ThaliMenuRepository::new(state.pool())
        .list_for_date(date)
        .await?;
    Ok(Json(ListResponse::new(menus)))
}

/// Create the day's menu, or replace its items.
///
/// POST /api/thali_menu
async fn save(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SaveThaliMenuRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let menu = body.validate()?;
    let (_, outcome) = ThaliMenuRepository::new(state.pool()).save(&menu).await?;

    let message = match outcome {
        MarkOutcome::Created => "Thali menu added successfully",
        MarkOutcome::Replaced => "Thali menu updated successfully",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// DELETE /api/thali_menu
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = ThaliMenuId::new(body.validate()?);
    ThaliMenuRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Thali menu"))?;
    Ok(Json(MessageResponse::new("Thali menu deleted successfully")))
}
