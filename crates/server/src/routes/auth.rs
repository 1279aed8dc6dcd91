//! Authentication route handlers.
//!
//! Login runs through the lockout-aware [`AuthService`]; a successful login
//! stores the sanitized profile in the session.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, JsonBody, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::UserProfile;
use crate::routes::MessageResponse;
use crate::services::{AttemptOutcome, AuthService};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
}

/// Login request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: UserProfile,
}

/// Current user response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// Attempt a login.
///
/// POST /api/auth
#[tracing::instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let auth = AuthService::for_pool(state.pool(), state.config().bootstrap_accounts);
    match auth.attempt(&username, &password, Utc::now()).await? {
        AttemptOutcome::Authenticated(user) => {
            set_current_user(&session, &user)
                .await
                .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
            set_sentry_user(&user.username);

            Ok(Json(LoginResponse {
                success: true,
                message: "Login successful",
                user,
            }))
        }
        AttemptOutcome::Rejected => Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        )),
        AttemptOutcome::Locked {
            remaining_minutes,
            lock_until,
        } => Err(AppError::Locked {
            remaining_minutes,
            lock_until,
        }),
    }
}

/// Return the logged-in user.
///
/// GET /api/auth/me
async fn me(RequireAuth(user): RequireAuth) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user,
    })
}

/// Logout and clear session.
///
/// POST /api/auth/logout
async fn logout(session: Session) -> Result<Json<MessageResponse>, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
