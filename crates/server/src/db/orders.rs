//! Restaurant order repository.
//!
//! Orders are addressed by their public order number (`order_id`, eight
//! zero-padded digits), not by the row id.

use chrono::NaiveDate;
use sqlx::PgPool;

use hotel_desk_core::OrderNumber;

use super::{RepositoryError, conflict_on_unique, require_affected};
use crate::models::order::{NewOrder, Order, OrderChanges};

const COLUMNS: &str = r"
    id, order_id, order_date, customer_name, customer_phone, table_number,
    num_of_persons, total_items, total_amount, created_at
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Orders placed on one day, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r"
            SELECT {COLUMNS} FROM hotel.customer_order
            WHERE order_date = $1
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Insert an order under a freshly minted order number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number is taken.
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        number: OrderNumber,
        order: &NewOrder,
    ) -> Result<Order, RepositoryError> {
        let created = sqlx::query_as::<_, Order>(&format!(
            r"
            INSERT INTO hotel.customer_order (
                order_id, order_date, customer_name, customer_phone, table_number,
                num_of_persons, total_items, total_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "
        ))
        .bind(number.to_string())
        .bind(order.order_date)
        .bind(&order.customer_name)
        .bind(order.customer_phone.as_deref())
        .bind(order.table_number.as_deref())
        .bind(order.num_of_persons)
        .bind(order.total_items)
        .bind(order.total_amount)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Order number"))?;

        Ok(created)
    }

    /// Apply a partial update to the order with this number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this number.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_by_number(
        &self,
        number: OrderNumber,
        changes: &OrderChanges,
    ) -> Result<Order, RepositoryError> {
        let updated = sqlx::query_as::<_, Order>(&format!(
            r"
            UPDATE hotel.customer_order
            SET customer_name = COALESCE($2, customer_name),
                customer_phone = CASE WHEN $3 THEN $4 ELSE customer_phone END,
                table_number = CASE WHEN $5 THEN $6 ELSE table_number END,
                total_amount = COALESCE($7, total_amount)
            WHERE order_id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(number.to_string())
        .bind(changes.customer_name.as_deref())
        .bind(changes.customer_phone.is_write())
        .bind(changes.customer_phone.as_deref())
        .bind(changes.table_number.is_write())
        .bind(changes.table_number.as_deref())
        .bind(changes.total_amount)
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    /// Delete the order with this number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this number.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_by_number(&self, number: OrderNumber) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.customer_order WHERE order_id = $1")
            .bind(number.to_string())
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
