//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as the JSON
//! envelope `{"success": false, "error": "<message>"}`; server-side failures
//! are captured to Sentry first and never leak details to the client.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body was not valid JSON for the endpoint.
    #[error("{0}")]
    BadRequest(String),

    /// Addressed record does not exist. Holds the resource label.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Caller is not authenticated or credentials were rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Username is locked out.
    #[error("Account locked. Try again in {remaining_minutes} minutes")]
    Locked {
        remaining_minutes: i64,
        lock_until: DateTime<Utc>,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a repository error, turning `NotFound` into a labelled 404.
    ///
    /// ```rust,ignore
    /// repo.delete(id).await.map_err(AppError::not_found_as("Worker"))?;
    /// ```
    pub fn not_found_as(what: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |err| match err {
            RepositoryError::NotFound => Self::NotFound(what),
            other => Self::Database(other),
        }
    }

    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(RepositoryError::Conflict(_)) => false,
            Self::Database(_) | Self::Internal(_) => true,
            Self::Auth(err) => !matches!(err, AuthError::MissingCredentials),
            _ => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::MissingCredentials) => StatusCode::BAD_REQUEST,
            Self::Locked { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Auth(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        // Don't expose internal error details to clients
        match self {
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(AuthError::MissingCredentials) => AuthError::MissingCredentials.to_string(),
            Self::Auth(_) => "Login failed".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let message = self.client_message();

        let body = match self {
            Self::Locked {
                remaining_minutes,
                lock_until,
            } => json!({
                "success": false,
                "error": message,
                "locked": true,
                "remainingMinutes": remaining_minutes,
                "lock_until": lock_until,
            }),
            _ => json!({ "success": false, "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON body extractor whose rejection uses the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after login.
pub fn set_sentry_user(username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
