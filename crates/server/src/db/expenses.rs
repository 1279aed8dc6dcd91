//! Daily expense repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use hotel_desk_core::ExpenseId;

use super::{RepositoryError, require_affected};
use crate::models::expense::{Expense, ExpenseChanges, NewExpense};

const COLUMNS: &str = "id, expense_date, title, amount, payment_mode, notes, created_at";

/// Repository for expense database operations.
pub struct ExpenseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepository<'a> {
    /// Create a new expense repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Expenses booked on one day, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Expense>, RepositoryError> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            r"
            SELECT {COLUMNS} FROM hotel.daily_expense
            WHERE expense_date = $1
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(expenses)
    }

    /// Insert an expense.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, expense: &NewExpense) -> Result<Expense, RepositoryError> {
        let created = sqlx::query_as::<_, Expense>(&format!(
            r"
            INSERT INTO hotel.daily_expense (expense_date, title, amount, payment_mode, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "
        ))
        .bind(expense.expense_date)
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(expense.payment_mode)
        .bind(expense.notes.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no expense has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ExpenseId,
        changes: &ExpenseChanges,
    ) -> Result<Expense, RepositoryError> {
        let updated = sqlx::query_as::<_, Expense>(&format!(
            r"
            UPDATE hotel.daily_expense
            SET title = COALESCE($2, title),
                amount = COALESCE($3, amount),
                payment_mode = COALESCE($4, payment_mode),
                notes = CASE WHEN $5 THEN $6 ELSE notes END
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.amount)
        .bind(changes.payment_mode)
        .bind(changes.notes.is_write())
        .bind(changes.notes.as_deref())
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    /// Delete an expense.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no expense has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ExpenseId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.daily_expense WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
