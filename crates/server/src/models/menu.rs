//! Kitchen menu models: the daily thali and the dated menu items.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hotel_desk_core::{MenuItemId, ThaliMenuId};

use super::input::{self, ValidationError};

/// The fixed thali served on one day.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ThaliMenu {
    pub id: ThaliMenuId,
    pub menu_date: NaiveDate,
    pub thali_items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated thali menu for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThaliMenu {
    pub menu_date: NaiveDate,
    pub thali_items: Vec<String>,
}

/// Body of `POST /api/thali_menu`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveThaliMenuRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub menu_date: Option<String>,
    #[serde(deserialize_with = "input::string_list")]
    pub thali_items: Option<Vec<String>>,
}

impl SaveThaliMenuRequest {
    /// Check required fields in order and convert.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewThaliMenu, ValidationError> {
        Ok(NewThaliMenu {
            menu_date: input::required_date(self.menu_date, "menu_date")?,
            thali_items: self
                .thali_items
                .ok_or(ValidationError::MissingField("thali_items"))?,
        })
    }
}

/// One item on the a-la-carte board for a date.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub date: NaiveDate,
    pub item_name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub date: NaiveDate,
    pub item_name: String,
}

/// Body of `POST /api/menu001`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMenuItemRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub date: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub item_name: Option<String>,
}

impl CreateMenuItemRequest {
    /// Check required fields in order and convert.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewMenuItem, ValidationError> {
        Ok(NewMenuItem {
            date: input::required_date(self.date, "date")?,
            item_name: input::required_text(self.item_name, "item_name")?,
        })
    }
}
