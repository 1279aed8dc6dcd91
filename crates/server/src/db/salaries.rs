//! Worker salary repository.

use sqlx::PgPool;

use hotel_desk_core::SalaryId;

use super::{RepositoryError, require_affected};
use crate::models::salary::{NewSalary, SalaryChanges, SalaryRecord};

const COLUMNS: &str =
    "id, month_year, worker_name, monthly_salary, advance, bonus, final_salary, created_at";

const INSERT: &str = r"
    INSERT INTO hotel.worker_salary
        (month_year, worker_name, monthly_salary, advance, bonus, final_salary)
    VALUES ($1, $2, $3, $4, $5, $6)
";

/// Repository for salary database operations.
pub struct SalaryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SalaryRepository<'a> {
    /// Create a new salary repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List salary statements, newest first, optionally for one `month_year`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, month_year: Option<&str>) -> Result<Vec<SalaryRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, SalaryRecord>(&format!(
            r"
            SELECT {COLUMNS} FROM hotel.worker_salary
            WHERE ($1::text IS NULL OR month_year = $1)
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(month_year)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Insert one statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, salary: &NewSalary) -> Result<SalaryRecord, RepositoryError> {
        let created = sqlx::query_as::<_, SalaryRecord>(&format!("{INSERT} RETURNING {COLUMNS}"))
            .bind(&salary.month_year)
            .bind(&salary.worker_name)
            .bind(salary.monthly_salary)
            .bind(salary.advance)
            .bind(salary.bonus)
            .bind(salary.final_salary)
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    /// Insert a batch in one transaction. Returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is
    /// saved in that case.
    pub async fn create_many(&self, salaries: &[NewSalary]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for salary in salaries {
            let result = sqlx::query(INSERT)
                .bind(&salary.month_year)
                .bind(&salary.worker_name)
                .bind(salary.monthly_salary)
                .bind(salary.advance)
                .bind(salary.bonus)
                .bind(salary.final_salary)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no statement has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: SalaryId,
        changes: &SalaryChanges,
    ) -> Result<SalaryRecord, RepositoryError> {
        let updated = sqlx::query_as::<_, SalaryRecord>(&format!(
            r"
            UPDATE hotel.worker_salary
            SET monthly_salary = COALESCE($2, monthly_salary),
                advance = COALESCE($3, advance),
                bonus = COALESCE($4, bonus),
                final_salary = COALESCE($5, final_salary)
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(changes.monthly_salary)
        .bind(changes.advance)
        .bind(changes.bonus)
        .bind(changes.final_salary)
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    /// Delete one statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no statement has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: SalaryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.worker_salary WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
