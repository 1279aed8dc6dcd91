//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The session only
//! carries the logged-in staff profile.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::HotelConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "hotel_desk_session";

/// Session expiry time in seconds (one working day plus slack).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Arguments
///
/// * `pool` - `PostgreSQL` connection pool
/// * `config` - Server configuration (for determining HTTPS mode)
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (never happens with the
/// hardcoded "hotel" and "session" values).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &HotelConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The session table is created by the 0001 migration in the hotel schema
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("hotel")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
