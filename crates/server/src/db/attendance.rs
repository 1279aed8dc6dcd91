//! Worker attendance repository.
//!
//! One mark per worker per day: `(attendance_date, worker_name)` is unique and
//! marking again replaces the earlier mark.

use chrono::NaiveDate;
use sqlx::PgPool;

use hotel_desk_core::AttendanceId;

use super::{RepositoryError, require_affected};
use crate::models::attendance::{AttendanceRecord, NewAttendance};

const COLUMNS: &str = "id, attendance_date, worker_name, role, status, notes, created_at";

const UPSERT: &str = r"
    INSERT INTO hotel.worker_attendance (attendance_date, worker_name, role, status, notes)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (attendance_date, worker_name) DO UPDATE
    SET role = EXCLUDED.role,
        status = EXCLUDED.status,
        notes = EXCLUDED.notes,
        created_at = NOW()
";

/// Whether a mark created a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Created,
    Replaced,
}

#[derive(Debug, sqlx::FromRow)]
struct MarkRow {
    #[sqlx(flatten)]
    record: AttendanceRecord,
    inserted: bool,
}

/// Repository for attendance database operations.
pub struct AttendanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttendanceRepository<'a> {
    /// Create a new attendance repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All marks for one day, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r"
            SELECT {COLUMNS} FROM hotel.worker_attendance
            WHERE attendance_date = $1
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Create or replace the mark for one worker and day.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn mark(
        &self,
        mark: &NewAttendance,
    ) -> Result<(AttendanceRecord, MarkOutcome), RepositoryError> {
        // xmax is zero only for freshly inserted tuples
        let row = sqlx::query_as::<_, MarkRow>(&format!(
            "{UPSERT} RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        ))
        .bind(mark.attendance_date)
        .bind(&mark.worker_name)
        .bind(&mark.role)
        .bind(mark.status)
        .bind(mark.notes.as_deref())
        .fetch_one(self.pool)
        .await?;

        let outcome = if row.inserted {
            MarkOutcome::Created
        } else {
            MarkOutcome::Replaced
        };
        Ok((row.record, outcome))
    }

    /// Save a batch of marks in one transaction. Returns the number saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// saved in that case.
    pub async fn mark_many(&self, marks: &[NewAttendance]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut saved = 0;

        for mark in marks {
            let result = sqlx::query(UPSERT)
                .bind(mark.attendance_date)
                .bind(&mark.worker_name)
                .bind(&mark.role)
                .bind(mark.status)
                .bind(mark.notes.as_deref())
                .execute(&mut *tx)
                .await?;
            saved += result.rows_affected();
        }

        tx.commit().await?;
        Ok(saved)
    }

    /// Delete one mark.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no mark has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: AttendanceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.worker_attendance WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
