//! Order counter preview.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::services::SequenceGenerator;
use crate::state::AppState;

/// Build the counter router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/counter", get(show))
}

/// `{"success": true, "seq": n}`
#[derive(Debug, Serialize)]
pub struct CounterResponse {
    pub success: bool,
    pub seq: i64,
}

/// Current counter value. The next order gets `seq + 1`; display only.
///
/// GET /api/counter
async fn show(State(state): State<AppState>) -> Result<Json<CounterResponse>, AppError> {
    let seq = SequenceGenerator::for_pool(state.pool()).peek().await?;
    Ok(Json(CounterResponse { success: true, seq }))
}
