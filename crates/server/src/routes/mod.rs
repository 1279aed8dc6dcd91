//! HTTP route handlers for the hotel JSON API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /api/auth               - Username/password login (lockout applies)
//! GET    /api/auth/me            - Current session user
//! POST   /api/auth/logout        - Clear the session
//!
//! # Restaurant
//! GET    /api/counter            - Last minted order counter value
//! GET    /api/orders?date=       - Orders for a day (default today)
//! POST   /api/orders             - Create order, mints order_id
//! PUT    /api/orders             - Update by order_id
//! DELETE /api/orders             - Delete by order_id
//!
//! # Staff
//! GET|POST|PUT|DELETE /api/workers
//! GET|POST|DELETE     /api/attendance?date=
//! POST                /api/worker_attendance      - Bulk attendance
//! GET|POST|PUT|DELETE /api/worker_salary?month=
//!
//! # Back office
//! GET|POST|PUT|DELETE /api/daily_expenses?date=
//! GET|POST|PUT|DELETE /api/banquet_management
//!
//! # Kitchen
//! GET|POST|DELETE     /api/thali_menu?date=
//! GET|POST|DELETE     /api/menu001?date=
//! ```
//!
//! Update and delete endpoints address records through the JSON body (`id`,
//! or `order_id` for orders), never through the path.

use axum::Router;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ValidationError;
use crate::models::input;
use crate::state::AppState;

pub mod attendance;
pub mod auth;
pub mod banquets;
pub mod counter;
pub mod expenses;
pub mod menu_items;
pub mod orders;
pub mod salaries;
pub mod thali_menu;
pub mod workers;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(counter::router())
        .merge(orders::router())
        .merge(workers::router())
        .merge(attendance::router())
        .merge(salaries::router())
        .merge(expenses::router())
        .merge(banquets::router())
        .merge(thali_menu::router())
        .merge(menu_items::router())
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// `{"success": true, "data": [...]}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub const fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{"success": true, "message": "...", "id": ...}`
#[derive(Debug, Serialize)]
pub struct CreatedResponse<I> {
    pub success: bool,
    pub message: &'static str,
    pub id: I,
}

impl<I> CreatedResponse<I> {
    #[must_use]
    pub const fn new(message: &'static str, id: I) -> Self {
        Self {
            success: true,
            message,
            id,
        }
    }
}

/// `{"success": true, "message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{"success": true, "message": "...", "insertedCount": n}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResponse {
    pub success: bool,
    pub message: String,
    pub inserted_count: u64,
}

impl BulkResponse {
    /// `what` is the plural noun, e.g. "Attendance" or "Salary records".
    #[must_use]
    pub fn new(what: &str, inserted_count: u64) -> Self {
        Self {
            success: true,
            message: format!("{what} saved successfully for {inserted_count} workers"),
            inserted_count,
        }
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// `?date=YYYY-MM-DD` filter.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// The requested date, if one was given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` for an unparseable date.
    pub fn date(self) -> Result<Option<NaiveDate>, ValidationError> {
        let raw = self.date.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty());
        input::optional_date(raw, "date")
    }

    /// The requested date, defaulting to today (UTC).
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` for an unparseable date.
    pub fn date_or_today(self) -> Result<NaiveDate, ValidationError> {
        Ok(self.date()?.unwrap_or_else(|| Utc::now().date_naive()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_date_query_defaults_to_today() {
        let query = DateQuery { date: None };
        assert_eq!(query.date_or_today().unwrap(), Utc::now().date_naive());

        let query = DateQuery {
            date: Some("  ".to_string()),
        };
        assert_eq!(query.date().unwrap(), None);
    }

    #[test]
    fn test_date_query_parses() {
        let query = DateQuery {
            date: Some("2026-02-14".to_string()),
        };
        assert_eq!(
            query.date_or_today().unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
        );

        let query = DateQuery {
            date: Some("14/02/2026".to_string()),
        };
        assert!(query.date().is_err());
    }

    #[test]
    fn test_bulk_message() {
        let body = serde_json::to_value(BulkResponse::new("Attendance", 3)).unwrap();
        assert_eq!(body["message"], "Attendance saved successfully for 3 workers");
        assert_eq!(body["insertedCount"], 3);
    }
}
