//! Dated menu item route handlers (`/api/menu001`).

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use hotel_desk_core::MenuItemId;

use crate::db::MenuItemRepository;
use crate::error::{AppError, JsonBody};
use crate::models::DeleteRequest;
use crate::models::menu::{CreateMenuItemRequest, MenuItem};
use crate::routes::{CreatedResponse, DateQuery, ListResponse, MessageResponse};
use crate::state::AppState;

/// Build the menu item router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/menu001", get(list).post(create).delete(delete))
}

/// All items, or only one date's when `?date=` is given.
///
/// GET /api/menu001
async fn list(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ListResponse<MenuItem>>, AppError> {
    let date = query.date()?;
    let items = MenuItemRepository::new(state.pool()).list(date).await?;
    Ok(Json(ListResponse::new(items)))
}

/// POST /api/menu001
async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateMenuItemRequest>,
) -> Result<Json<CreatedResponse<MenuItemId>>, AppError> {
    let item = body.validate()?;
    let created = MenuItemRepository::new(state.pool()).create(&item).await?;
    Ok(Json(CreatedResponse::new(
        "Menu item added successfully",
        created.id,
    )))
}

/// DELETE /api/menu001
async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = MenuItemId::new(body.validate()?);
    MenuItemRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::not_found_as("Menu item"))?;
    Ok(Json(MessageResponse::new("Menu item deleted successfully")))
}
