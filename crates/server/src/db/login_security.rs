//! Per-username failed-attempt counter and lock deadline.
//!
//! Rows are keyed by username, not by user id, so attempts against unknown
//! usernames are throttled too. Rows are upserted and never deleted.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hotel_desk_core::SecurityState;

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct SecurityRow {
    failed_attempts: i32,
    lock_until: Option<DateTime<Utc>>,
}

impl TryFrom<SecurityRow> for SecurityState {
    type Error = RepositoryError;

    fn try_from(row: SecurityRow) -> Result<Self, Self::Error> {
        let failed_attempts = u32::try_from(row.failed_attempts).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative failed_attempts: {}",
                row.failed_attempts
            ))
        })?;
        Ok(Self {
            failed_attempts,
            lock_until: row.lock_until,
        })
    }
}

/// Repository for login security state.
pub struct LoginSecurityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LoginSecurityRepository<'a> {
    /// Create a new login security repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the state for `username`. A missing row is the default state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored counter is negative.
    pub async fn get(&self, username: &str) -> Result<SecurityState, RepositoryError> {
        let row = sqlx::query_as::<_, SecurityRow>(
            r"
            SELECT failed_attempts, lock_until
            FROM hotel.login_security
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        row.map_or_else(|| Ok(SecurityState::default()), TryInto::try_into)
    }

    /// Write the state for `username`, creating the row if needed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn save(&self, username: &str, state: &SecurityState) -> Result<(), RepositoryError> {
        let failed_attempts = i32::try_from(state.failed_attempts).unwrap_or(i32::MAX);

        sqlx::query(
            r"
            INSERT INTO hotel.login_security (username, failed_attempts, lock_until, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (username) DO UPDATE
            SET failed_attempts = EXCLUDED.failed_attempts,
                lock_until = EXCLUDED.lock_until,
                updated_at = NOW()
            ",
        )
        .bind(username)
        .bind(failed_attempts)
        .bind(state.lock_until)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
