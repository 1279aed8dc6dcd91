//! Kitchen menu repositories: the daily thali and the dated item board.

use chrono::NaiveDate;
use sqlx::PgPool;

use hotel_desk_core::{MenuItemId, ThaliMenuId};

use super::attendance::MarkOutcome;
use super::{RepositoryError, require_affected};
use crate::models::menu::{MenuItem, NewMenuItem, NewThaliMenu, ThaliMenu};

#[derive(Debug, sqlx::FromRow)]
struct SaveRow {
    #[sqlx(flatten)]
    menu: ThaliMenu,
    inserted: bool,
}

/// Repository for the daily thali menu. One menu per date.
pub struct ThaliMenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ThaliMenuRepository<'a> {
    /// Create a new thali menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The menu for one day (zero or one rows).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<ThaliMenu>, RepositoryError> {
        let menus = sqlx::query_as::<_, ThaliMenu>(
            r"
            SELECT id, menu_date, thali_items, created_at
            FROM hotel.thali_menu
            WHERE menu_date = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(menus)
    }

    /// Create the menu for a date, or replace the items of an existing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn save(
        &self,
        menu: &NewThaliMenu,
    ) -> Result<(ThaliMenu, MarkOutcome), RepositoryError> {
        let row = sqlx::query_as::<_, SaveRow>(
            r"
            INSERT INTO hotel.thali_menu (menu_date, thali_items)
            VALUES ($1, $2)
            ON CONFLICT (menu_date) DO UPDATE
            SET thali_items = EXCLUDED.thali_items,
                created_at = NOW()
            RETURNING id, menu_date, thali_items, created_at, (xmax = 0) AS inserted
            ",
        )
        .bind(menu.menu_date)
        .bind(&menu.thali_items)
        .fetch_one(self.pool)
        .await?;

        let outcome = if row.inserted {
            MarkOutcome::Created
        } else {
            MarkOutcome::Replaced
        };
        Ok((row.menu, outcome))
    }

    /// Delete a menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no menu has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ThaliMenuId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.thali_menu WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}

/// Repository for dated menu items.
pub struct MenuItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Menu items, newest first, optionally for a single date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<MenuItem>, RepositoryError> {
        let items = sqlx::query_as::<_, MenuItem>(
            r"
            SELECT id, date, item_name, created_at
            FROM hotel.menu_item
            WHERE ($1::date IS NULL OR date = $1)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Insert a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: &NewMenuItem) -> Result<MenuItem, RepositoryError> {
        let created = sqlx::query_as::<_, MenuItem>(
            r"
            INSERT INTO hotel.menu_item (date, item_name)
            VALUES ($1, $2)
            RETURNING id, date, item_name, created_at
            ",
        )
        .bind(item.date)
        .bind(&item.item_name)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Delete a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.menu_item WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
