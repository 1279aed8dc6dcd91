//! Daily expense models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotel_desk_core::{ExpenseId, PaymentMode};

use super::input::{self, Patch, ValidationError};

/// A single outgoing payment.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Expense {
    pub id: ExpenseId,
    pub expense_date: NaiveDate,
    pub title: String,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub expense_date: NaiveDate,
    pub title: String,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
}

/// Partial update of an expense.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseChanges {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub notes: Patch<String>,
}

/// Body of `POST /api/daily_expenses`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateExpenseRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub expense_date: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub title: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub amount: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub payment_mode: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub notes: Option<String>,
}

impl CreateExpenseRequest {
    /// Check required fields in order and convert.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewExpense, ValidationError> {
        let expense_date = input::required_date(self.expense_date, "expense_date")?;
        let title = input::required_text(self.title, "title")?;
        let amount = input::required_amount(self.amount, "amount")?;
        let payment_mode = input::required_text(self.payment_mode, "payment_mode")?;
        let payment_mode = input::optional_enum(Some(payment_mode), "payment_mode")?
            .ok_or(ValidationError::MissingField("payment_mode"))?;

        Ok(NewExpense {
            expense_date,
            title,
            amount,
            payment_mode,
            notes: self.notes,
        })
    }
}

/// Body of `PUT /api/daily_expenses`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateExpenseRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub id: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub title: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub amount: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub payment_mode: Option<String>,
    #[serde(deserialize_with = "input::patch")]
    pub notes: Patch<String>,
}

impl UpdateExpenseRequest {
    /// Resolve the target id and the changed columns.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` without an id and `NoFieldsToUpdate` when nothing
    /// would change.
    pub fn validate(self) -> Result<(ExpenseId, ExpenseChanges), ValidationError> {
        let id = ExpenseId::new(input::record_id(self.id, "id")?);
        let changes = ExpenseChanges {
            title: self.title,
            amount: input::nonzero_amount(self.amount, "amount")?,
            payment_mode: input::optional_enum(self.payment_mode, "payment_mode")?,
            notes: self.notes,
        };
        if changes == ExpenseChanges::default() {
            return Err(ValidationError::NoFieldsToUpdate);
        }
        Ok((id, changes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_expense() {
        let req: CreateExpenseRequest = serde_json::from_str(
            r#"{"expense_date": "2026-02-03", "title": "Vegetables", "amount": 820.5, "payment_mode": "UPI"}"#,
        )
        .unwrap();
        let expense = req.validate().unwrap();
        assert_eq!(expense.payment_mode, PaymentMode::Upi);
        assert_eq!(expense.amount.to_string(), "820.5");
    }

    #[test]
    fn test_zero_amount_is_missing() {
        let req: CreateExpenseRequest = serde_json::from_str(
            r#"{"expense_date": "2026-02-03", "title": "Vegetables", "amount": 0, "payment_mode": "Cash"}"#,
        )
        .unwrap();
        assert_eq!(req.validate(), Err(ValidationError::MissingField("amount")));
    }

    #[test]
    fn test_unknown_payment_mode() {
        let req: CreateExpenseRequest = serde_json::from_str(
            r#"{"expense_date": "2026-02-03", "title": "Gas", "amount": 900, "payment_mode": "Cheque"}"#,
        )
        .unwrap();
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "Invalid payment_mode: invalid payment mode: Cheque"
        );
    }

    #[test]
    fn test_update_clears_notes_and_ignores_zero_amount() {
        let req: UpdateExpenseRequest =
            serde_json::from_str(r#"{"id": 9, "amount": 0, "notes": ""}"#).unwrap();
        let (id, changes) = req.validate().unwrap();
        assert_eq!(id, ExpenseId::new(9));
        assert_eq!(changes.amount, None);
        assert_eq!(changes.notes, Patch::Clear);
    }

    #[test]
    fn test_update_zero_amount_alone_changes_nothing() {
        let req: UpdateExpenseRequest =
            serde_json::from_str(r#"{"id": 9, "amount": 0}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::NoFieldsToUpdate));
    }
}
