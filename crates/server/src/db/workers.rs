//! Worker roster repository.

use sqlx::PgPool;

use hotel_desk_core::WorkerId;

use super::{RepositoryError, require_affected};
use crate::models::worker::{NewWorker, Worker, WorkerChanges};

const COLUMNS: &str = "id, worker_name, mobile_no, role, joining_date, created_at";

/// Repository for worker database operations.
pub struct WorkerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkerRepository<'a> {
    /// Create a new worker repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all workers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Worker>, RepositoryError> {
        let workers = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {COLUMNS} FROM hotel.worker ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(workers)
    }

    /// Insert a worker.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, worker: &NewWorker) -> Result<Worker, RepositoryError> {
        let created = sqlx::query_as::<_, Worker>(&format!(
            r"
            INSERT INTO hotel.worker (worker_name, role, joining_date, mobile_no)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "
        ))
        .bind(&worker.worker_name)
        .bind(&worker.role)
        .bind(worker.joining_date)
        .bind(worker.mobile_no.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update. Nullable columns are written only when their
    /// patch says so, which lets a caller clear them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no worker has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: WorkerId,
        changes: &WorkerChanges,
    ) -> Result<Worker, RepositoryError> {
        let updated = sqlx::query_as::<_, Worker>(&format!(
            r"
            UPDATE hotel.worker
            SET worker_name = COALESCE($2, worker_name),
                mobile_no = CASE WHEN $3 THEN $4 ELSE mobile_no END,
                role = COALESCE($5, role),
                joining_date = COALESCE($6, joining_date)
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(changes.worker_name.as_deref())
        .bind(changes.mobile_no.is_write())
        .bind(changes.mobile_no.as_deref())
        .bind(changes.role.as_deref())
        .bind(changes.joining_date)
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    /// Delete a worker.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no worker has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: WorkerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.worker WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
