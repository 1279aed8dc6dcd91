//! Named monotonic counters.
//!
//! Each counter is one row; increments are a single upsert statement so
//! concurrent callers are serialised by the row lock.

use sqlx::PgPool;

use super::RepositoryError;

/// Key of the counter that mints order numbers.
pub const ORDER_COUNTER: &str = "order_id";

/// Repository for named counters.
pub struct CounterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CounterRepository<'a> {
    /// Create a new counter repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Atomically add one to `key` and return the new value. A missing row
    /// starts at zero, so the first call returns 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn increment(&self, key: &str) -> Result<i64, RepositoryError> {
        let seq: i64 = sqlx::query_scalar(
            r"
            INSERT INTO hotel.counter (id, seq)
            VALUES ($1, 1)
            ON CONFLICT (id) DO UPDATE SET seq = hotel.counter.seq + 1
            RETURNING seq
            ",
        )
        .bind(key)
        .fetch_one(self.pool)
        .await?;

        Ok(seq)
    }

    /// Current value of `key`, or 0 when the row does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn current(&self, key: &str) -> Result<i64, RepositoryError> {
        let seq: Option<i64> = sqlx::query_scalar("SELECT seq FROM hotel.counter WHERE id = $1")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;

        Ok(seq.unwrap_or(0))
    }

    /// Create `key` at zero if it does not exist. Existing values are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn ensure(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO hotel.counter (id, seq) VALUES ($1, 0) ON CONFLICT (id) DO NOTHING")
            .bind(key)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
