//! Append-only login audit trail.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{LoginLogEntry, NewLoginLog};

/// Repository for the login audit log.
pub struct LoginLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LoginLogRepository<'a> {
    /// Create a new login log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one entry. Date and time-of-day come from the same UTC instant
    /// as the timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn append(&self, entry: &NewLoginLog) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO hotel.login_log
                (username, login_date, login_time, outcome, attempted_password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&entry.username)
        .bind(entry.at.date_naive())
        .bind(entry.at.time())
        .bind(entry.outcome)
        .bind(entry.attempted_password.as_deref())
        .bind(entry.at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Most recent entries for `username`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for(
        &self,
        username: &str,
        limit: i64,
    ) -> Result<Vec<LoginLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, LoginLogEntry>(
            r"
            SELECT id, username, login_date, login_time, outcome, attempted_password, created_at
            FROM hotel.login_log
            WHERE username = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(username)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
