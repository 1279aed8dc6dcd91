//! Monthly salary models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotel_desk_core::SalaryId;

use super::input::{self, Patch, ValidationError};

/// A salary statement for one worker and one month.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SalaryRecord {
    pub id: SalaryId,
    pub month_year: String,
    pub worker_name: String,
    pub monthly_salary: Decimal,
    pub advance: Decimal,
    pub bonus: Decimal,
    pub final_salary: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a salary statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalary {
    pub month_year: String,
    pub worker_name: String,
    pub monthly_salary: Decimal,
    pub final_salary: Decimal,
    pub advance: Decimal,
    pub bonus: Decimal,
}

/// Partial update of a salary statement. A cleared advance or bonus is
/// written as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryChanges {
    pub monthly_salary: Option<Decimal>,
    pub advance: Option<Decimal>,
    pub bonus: Option<Decimal>,
    pub final_salary: Option<Decimal>,
}

/// Body of `POST /api/worker_salary`, and each element of a bulk body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSalaryRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub month_year: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub worker_name: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub monthly_salary: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub final_salary: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub advance: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub bonus: Option<String>,
}

impl CreateSalaryRequest {
    /// Check required fields in order and convert. Advance and bonus default
    /// to zero, and a zero salary amount is accepted.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewSalary, ValidationError> {
        Ok(NewSalary {
            month_year: input::required_text(self.month_year, "month_year")?,
            worker_name: input::required_text(self.worker_name, "worker_name")?,
            monthly_salary: input::required_amount_allow_zero(
                self.monthly_salary,
                "monthly_salary",
            )?,
            final_salary: input::required_amount_allow_zero(self.final_salary, "final_salary")?,
            advance: input::optional_amount(self.advance, "advance")?.unwrap_or_default(),
            bonus: input::optional_amount(self.bonus, "bonus")?.unwrap_or_default(),
        })
    }
}

/// Validate a bulk salary body.
///
/// # Errors
///
/// Returns `Malformed` for an empty batch, or the first entry's error with the
/// entry named in the message.
pub fn validate_batch(entries: Vec<CreateSalaryRequest>) -> Result<Vec<NewSalary>, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::Malformed(
            "Salary data must not be empty".to_string(),
        ));
    }
    entries
        .into_iter()
        .map(|entry| {
            entry.validate().map_err(|err| match err {
                ValidationError::MissingField(_) => {
                    ValidationError::Malformed(format!("{err} in salary record"))
                }
                other => other,
            })
        })
        .collect()
}

/// Body of `PUT /api/worker_salary`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSalaryRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub id: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub monthly_salary: Option<String>,
    #[serde(deserialize_with = "input::patch")]
    pub advance: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub bonus: Patch<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub final_salary: Option<String>,
}

/// Advance and bonus are never null; clearing one resets it to zero.
fn deduction(
    value: Patch<String>,
    field: &'static str,
) -> Result<Option<Decimal>, ValidationError> {
    Ok(match value {
        Patch::Keep => None,
        Patch::Clear => Some(Decimal::ZERO),
        Patch::Set(raw) => input::optional_amount(Some(raw), field)?,
    })
}

impl UpdateSalaryRequest {
    /// Resolve the target id and the changed columns.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` without an id and `NoFieldsToUpdate` when nothing
    /// would change.
    pub fn validate(self) -> Result<(SalaryId, SalaryChanges), ValidationError> {
        let id = SalaryId::new(input::record_id(self.id, "id")?);
        let changes = SalaryChanges {
            monthly_salary: input::nonzero_amount(self.monthly_salary, "monthly_salary")?,
            advance: deduction(self.advance, "advance")?,
            bonus: deduction(self.bonus, "bonus")?,
            final_salary: input::nonzero_amount(self.final_salary, "final_salary")?,
        };
        if changes == SalaryChanges::default() {
            return Err(ValidationError::NoFieldsToUpdate);
        }
        Ok((id, changes))
    }
}
