//! Database operations for the hotel `PostgreSQL` schema.
//!
//! ## Tables (schema `hotel`)
//!
//! - `app_user` - Staff logins (Argon2 password hashes)
//! - `login_security` - Failed-attempt counter and lock deadline per username
//! - `login_log` - Append-only login audit trail
//! - `counter` - Named sequences (`order_id`)
//! - `worker`, `worker_attendance`, `worker_salary` - Staff records
//! - `daily_expense` - Outgoing payments
//! - `banquet_booking` - Hall bookings
//! - `thali_menu`, `menu_item` - Kitchen menus
//! - `customer_order` - Restaurant orders
//! - `session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p hotel-desk-cli -- migrate
//! ```

pub mod attendance;
pub mod banquets;
pub mod counters;
pub mod expenses;
pub mod login_logs;
pub mod login_security;
pub mod menus;
pub mod orders;
pub mod salaries;
pub mod users;
pub mod workers;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use attendance::AttendanceRepository;
pub use banquets::BookingRepository;
pub use counters::CounterRepository;
pub use expenses::ExpenseRepository;
pub use login_logs::LoginLogRepository;
pub use login_security::LoginSecurityRepository;
pub use menus::{MenuItemRepository, ThaliMenuRepository};
pub use orders::OrderRepository;
pub use salaries::SalaryRepository;
pub use users::UserRepository;
pub use workers::WorkerRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(2.min(max_connections))
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

/// Turn an affected-row count into `NotFound` when nothing matched.
const fn require_affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}
