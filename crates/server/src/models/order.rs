//! Restaurant order models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotel_desk_core::{OrderNumber, OrderRowId};

use super::input::{self, Patch, ValidationError};

/// A placed order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderRowId,
    pub order_id: String,
    pub order_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub table_number: Option<String>,
    pub num_of_persons: i32,
    pub total_items: i32,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new order. The order number is minted separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_date: NaiveDate,
    pub customer_name: String,
    pub num_of_persons: i32,
    pub total_items: i32,
    pub total_amount: Decimal,
    pub customer_phone: Option<String>,
    pub table_number: Option<String>,
}

/// Partial update of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub customer_name: Option<String>,
    pub customer_phone: Patch<String>,
    pub table_number: Patch<String>,
    pub total_amount: Option<Decimal>,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub order_date: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub num_of_persons: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub total_items: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub total_amount: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub customer_phone: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub table_number: Option<String>,
}

impl CreateOrderRequest {
    /// Check required fields in order and convert.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewOrder, ValidationError> {
        Ok(NewOrder {
            order_date: input::required_date(self.order_date, "order_date")?,
            customer_name: input::required_text(self.customer_name, "customer_name")?,
            num_of_persons: input::required_number(self.num_of_persons, "num_of_persons")?,
            total_items: input::required_number(self.total_items, "total_items")?,
            total_amount: input::required_amount(self.total_amount, "total_amount")?,
            customer_phone: self.customer_phone,
            table_number: self.table_number,
        })
    }
}

/// Body of `PUT /api/orders`, addressed by order number.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateOrderRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub order_id: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "input::patch")]
    pub customer_phone: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub table_number: Patch<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub total_amount: Option<String>,
}

impl UpdateOrderRequest {
    /// Resolve the target order number and the changed columns.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` without an order number and `NoFieldsToUpdate`
    /// when nothing would change.
    pub fn validate(self) -> Result<(OrderNumber, OrderChanges), ValidationError> {
        let order_id = order_number(self.order_id)?;
        let changes = OrderChanges {
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            table_number: self.table_number,
            total_amount: input::nonzero_amount(self.total_amount, "total_amount")?,
        };
        if changes == OrderChanges::default() {
            return Err(ValidationError::NoFieldsToUpdate);
        }
        Ok((order_id, changes))
    }
}

/// Body of `DELETE /api/orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteOrderRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub order_id: Option<String>,
}

impl DeleteOrderRequest {
    /// Resolve the target order number.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` without an order number.
    pub fn validate(self) -> Result<OrderNumber, ValidationError> {
        order_number(self.order_id)
    }
}

fn order_number(raw: Option<String>) -> Result<OrderNumber, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingKey("order_id"))?;
    OrderNumber::parse(&raw).ok_or_else(|| ValidationError::InvalidField {
        field: "order_id",
        reason: format!("{raw} is not an order number"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_field_order() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"order_date": "2026-05-05", "customer_name": "Walk-in", "num_of_persons": 2, "total_amount": 540}"#,
        )
        .unwrap();
        assert_eq!(
            req.validate(),
            Err(ValidationError::MissingField("total_items"))
        );
    }

    #[test]
    fn test_create_order_numeric_strings() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"order_date": "2026-05-05", "customer_name": "Walk-in", "num_of_persons": "2",
                "total_items": "3", "total_amount": "540.00", "table_number": 7}"#,
        )
        .unwrap();
        let order = req.validate().unwrap();
        assert_eq!(order.num_of_persons, 2);
        assert_eq!(order.total_items, 3);
        assert_eq!(order.table_number.as_deref(), Some("7"));
    }

    #[test]
    fn test_update_by_order_number() {
        let req: UpdateOrderRequest =
            serde_json::from_str(r#"{"order_id": "00000042", "table_number": "5"}"#).unwrap();
        let (order_id, changes) = req.validate().unwrap();
        assert_eq!(order_id, OrderNumber::new(42));
        assert_eq!(changes.table_number.as_deref(), Some("5"));
    }

    #[test]
    fn test_delete_requires_order_number() {
        let req: DeleteOrderRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "Missing order_id"
        );
    }

    #[test]
    fn test_update_null_phone_clears_it() {
        let req: UpdateOrderRequest =
            serde_json::from_str(r#"{"order_id": "00000042", "customer_phone": null}"#).unwrap();
        let (_, changes) = req.validate().unwrap();
        assert_eq!(changes.customer_phone, Patch::Clear);
        assert_eq!(changes.table_number, Patch::Keep);
    }

    #[test]
    fn test_update_zero_total_is_ignored() {
        let req: UpdateOrderRequest =
            serde_json::from_str(r#"{"order_id": "00000042", "total_amount": 0}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::NoFieldsToUpdate));
    }
}
