//! Request-body parsing shared by the create and update payloads.
//!
//! The browser pages post loosely typed JSON: numbers arrive as numbers or as
//! numeric strings, optional fields arrive as `""` or `null`. Payload structs
//! therefore capture every scalar as trimmed text (see [`scalar`]) and convert
//! it to a typed value during validation, so that error messages name the
//! offending field.
//!
//! A required field is missing when it is absent, `null`, empty, or a number
//! equal to zero. Salary amounts are the exception: zero is a real value there
//! (see [`required_amount_allow_zero`]).
//!
//! Update payloads distinguish an absent key from an explicit `null` or `""`
//! on nullable columns through [`Patch`]: absent keeps the stored value,
//! `null` clears it.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// A request payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but cannot be interpreted.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Update or delete without a record id.
    #[error("Missing {0}")]
    MissingKey(&'static str),

    /// Update without any recognised field.
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// Any other malformed body.
    #[error("{0}")]
    Malformed(String),
}

impl ValidationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Deserializers
// =============================================================================

/// Deserialize a scalar (string, number or bool) into trimmed text.
///
/// `null` and blank strings become `None`.
///
/// # Errors
///
/// Fails on arrays and objects.
pub fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Deserialize a list of strings.
///
/// Accepts a JSON array of scalars or a single comma-separated string. Blank
/// entries are dropped.
///
/// # Errors
///
/// Fails on objects and nested arrays.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.split(',').map(str::to_owned).collect::<Vec<_>>(),
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(D::Error::custom(format!(
                    "expected a list of strings, got element {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a list of strings, got {other}"
            )));
        }
    };

    Ok(Some(
        items
            .into_iter()
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect(),
    ))
}

/// A nullable column in an update body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent: keep the stored value.
    #[default]
    Keep,
    /// Key present as `null` or blank: store NULL.
    Clear,
    /// Key present with a value.
    Set(T),
}

impl<T> Patch<T> {
    /// Whether the column is written at all.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        !matches!(self, Self::Keep)
    }

    /// The value to write; `None` for both `Keep` and `Clear`.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// The value for an insert, where clearing and omitting are the same.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// Convert the value, keeping `Keep` and `Clear`.
    ///
    /// # Errors
    ///
    /// Returns the conversion error.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)?),
        })
    }
}

impl Patch<String> {
    /// Borrowed text for binding.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}

/// Deserialize a scalar into a [`Patch`]. Only called when the key is
/// present, so pair it with `#[serde(default)]`.
///
/// # Errors
///
/// Fails on arrays and objects.
pub fn patch<'de, D>(deserializer: D) -> Result<Patch<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar(deserializer)?.map_or(Patch::Clear, Patch::Set))
}

/// Deserialize a string list into a [`Patch`]; `null` clears it.
///
/// # Errors
///
/// Fails on objects and nested arrays.
pub fn patch_list<'de, D>(deserializer: D) -> Result<Patch<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(deserializer)?.map_or(Patch::Clear, Patch::Set))
}

// =============================================================================
// Field conversion
// =============================================================================

/// Require a text field.
///
/// # Errors
///
/// Returns `MissingField` when the value is absent.
pub fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

/// Require a calendar date (`YYYY-MM-DD`, or an ISO-8601 timestamp whose date
/// part is used).
///
/// # Errors
///
/// Returns `MissingField` when absent, `InvalidField` when unparseable.
pub fn required_date(
    value: Option<String>,
    field: &'static str,
) -> Result<NaiveDate, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField(field))?;
    parse_date(&raw, field)
}

/// Convert an optional date field.
///
/// # Errors
///
/// Returns `InvalidField` when present but unparseable.
pub fn optional_date(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ValidationError> {
    value.map(|raw| parse_date(&raw, field)).transpose()
}

/// Require a non-zero number.
///
/// # Errors
///
/// Returns `MissingField` when absent or zero, `InvalidField` when not a number.
pub fn required_number<T>(value: Option<String>, field: &'static str) -> Result<T, ValidationError>
where
    T: FromStr + Default + PartialEq,
{
    let raw = value.ok_or(ValidationError::MissingField(field))?;
    let number: T = parse_number(&raw, field)?;
    if number == T::default() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(number)
}

/// Convert an optional number. Zero is kept.
///
/// # Errors
///
/// Returns `InvalidField` when present but not a number.
pub fn optional_number<T>(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<T>, ValidationError>
where
    T: FromStr,
{
    value.map(|raw| parse_number(&raw, field)).transpose()
}

/// Convert an optional enum label.
///
/// # Errors
///
/// Returns `InvalidField` with the parser's message when the label is unknown.
pub fn optional_enum<T>(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<T>, ValidationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| raw.parse().map_err(|e: T::Err| ValidationError::invalid(field, e.to_string())))
        .transpose()
}

/// Parse a record id from an update or delete body.
///
/// # Errors
///
/// Returns `MissingKey` when absent, `InvalidField` when not an integer.
pub fn record_id(value: Option<String>, key: &'static str) -> Result<i32, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingKey(key))?;
    raw.parse()
        .map_err(|_| ValidationError::invalid(key, format!("{raw} is not a record id")))
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid(field, format!("{raw} is not a YYYY-MM-DD date")))
}

fn parse_number<T: FromStr>(raw: &str, field: &'static str) -> Result<T, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::invalid(field, format!("{raw} is not a number")))
}

/// Parse a decimal amount, accepting JSON exponent notation.
///
/// # Errors
///
/// Returns `InvalidField` when the text is not a decimal number.
pub fn parse_amount(raw: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::invalid(field, format!("{raw} is not an amount")))
}

/// Require a non-zero decimal amount.
///
/// # Errors
///
/// Returns `MissingField` when absent or zero, `InvalidField` when not a number.
pub fn required_amount(
    value: Option<String>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField(field))?;
    let amount = parse_amount(&raw, field)?;
    if amount.is_zero() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(amount)
}

/// Convert an optional decimal amount. Zero is kept.
///
/// # Errors
///
/// Returns `InvalidField` when present but not a number.
pub fn optional_amount(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<Decimal>, ValidationError> {
    value.map(|raw| parse_amount(&raw, field)).transpose()
}

/// Require a decimal amount, accepting zero.
///
/// # Errors
///
/// Returns `MissingField` when absent, `InvalidField` when not a number.
pub fn required_amount_allow_zero(
    value: Option<String>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField(field))?;
    parse_amount(&raw, field)
}

/// An amount in an update body for a non-nullable column. Zero counts as not
/// given, like a blank.
///
/// # Errors
///
/// Returns `InvalidField` when present but not a number.
pub fn nonzero_amount(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<Decimal>, ValidationError> {
    Ok(optional_amount(value, field)?.filter(|amount| !amount.is_zero()))
}

/// A number in an update body for a non-nullable column. Zero counts as not
/// given.
///
/// # Errors
///
/// Returns `InvalidField` when present but not a number.
pub fn nonzero_number<T>(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<T>, ValidationError>
where
    T: FromStr + Default + PartialEq,
{
    Ok(optional_number(value, field)?.filter(|number: &T| *number != T::default()))
}

/// Convert a nullable amount patch. Zero clears the column.
///
/// # Errors
///
/// Returns `InvalidField` when present but not a number.
pub fn patch_amount(
    value: Patch<String>,
    field: &'static str,
) -> Result<Patch<Decimal>, ValidationError> {
    let amount = value.try_map(|raw| parse_amount(&raw, field))?;
    Ok(match amount {
        Patch::Set(zero) if zero.is_zero() => Patch::Clear,
        other => other,
    })
}

/// Convert a nullable number patch. Zero clears the column.
///
/// # Errors
///
/// Returns `InvalidField` when present but not a number.
pub fn patch_number<T>(value: Patch<String>, field: &'static str) -> Result<Patch<T>, ValidationError>
where
    T: FromStr + Default + PartialEq,
{
    let number = value.try_map(|raw| parse_number::<T>(&raw, field))?;
    Ok(match number {
        Patch::Set(zero) if zero == T::default() => Patch::Clear,
        other => other,
    })
}

/// Convert a nullable enum patch.
///
/// # Errors
///
/// Returns `InvalidField` with the parser's message when the label is unknown.
pub fn patch_enum<T>(value: Patch<String>, field: &'static str) -> Result<Patch<T>, ValidationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.try_map(|raw| raw.parse().map_err(|e: T::Err| ValidationError::invalid(field, e.to_string())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        #[serde(deserialize_with = "scalar")]
        value: Option<String>,
        #[serde(deserialize_with = "string_list")]
        items: Option<Vec<String>>,
        #[serde(deserialize_with = "patch")]
        note: Patch<String>,
    }

    fn payload(json: &str) -> Payload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scalar_accepts_numbers_and_strings() {
        assert_eq!(payload(r#"{"value": 12}"#).value.as_deref(), Some("12"));
        assert_eq!(payload(r#"{"value": "12.50"}"#).value.as_deref(), Some("12.50"));
        assert_eq!(payload(r#"{"value": "  Ravi "}"#).value.as_deref(), Some("Ravi"));
    }

    #[test]
    fn test_scalar_blank_and_null_are_absent() {
        assert_eq!(payload(r#"{"value": ""}"#).value, None);
        assert_eq!(payload(r#"{"value": "   "}"#).value, None);
        assert_eq!(payload(r#"{"value": null}"#).value, None);
        assert_eq!(payload("{}").value, None);
    }

    #[test]
    fn test_scalar_rejects_objects() {
        assert!(serde_json::from_str::<Payload>(r#"{"value": {"a": 1}}"#).is_err());
    }

    #[test]
    fn test_string_list_accepts_array_and_csv() {
        assert_eq!(
            payload(r#"{"items": ["Dal", " Rice ", ""]}"#).items,
            Some(vec!["Dal".to_string(), "Rice".to_string()])
        );
        assert_eq!(
            payload(r#"{"items": "Dal, Rice,Roti"}"#).items,
            Some(vec!["Dal".to_string(), "Rice".to_string(), "Roti".to_string()])
        );
        assert_eq!(payload(r#"{"items": []}"#).items, Some(vec![]));
    }

    #[test]
    fn test_required_number_treats_zero_as_missing() {
        assert_eq!(
            required_number::<i32>(Some("0".into()), "expected_guests"),
            Err(ValidationError::MissingField("expected_guests"))
        );
        assert_eq!(required_number::<i32>(Some("150".into()), "expected_guests"), Ok(150));
    }

    #[test]
    fn test_required_number_rejects_garbage() {
        let err = required_number::<i32>(Some("many".into()), "num_of_persons").unwrap_err();
        assert_eq!(err.to_string(), "Invalid num_of_persons: many is not a number");
    }

    #[test]
    fn test_amounts() {
        assert_eq!(
            required_amount(Some("0.00".into()), "amount"),
            Err(ValidationError::MissingField("amount"))
        );
        assert_eq!(
            required_amount(Some("249.5".into()), "amount").unwrap().to_string(),
            "249.5"
        );
        assert_eq!(
            optional_amount(Some("0".into()), "advance").unwrap(),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            parse_amount("1e3", "amount").unwrap(),
            Decimal::from(1000)
        );
    }

    #[test]
    fn test_dates() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(required_date(Some("2026-03-14".into()), "event_date"), Ok(expected));
        assert_eq!(
            required_date(Some("2026-03-14T10:30:00.000Z".into()), "event_date"),
            Ok(expected)
        );
        assert!(required_date(Some("14/03/2026".into()), "event_date").is_err());
        assert_eq!(
            required_date(None, "event_date"),
            Err(ValidationError::MissingField("event_date"))
        );
    }

    #[test]
    fn test_record_id() {
        assert_eq!(record_id(Some("17".into()), "id"), Ok(17));
        assert_eq!(
            record_id(None, "id").unwrap_err().to_string(),
            "Missing id"
        );
        assert!(record_id(Some("abc".into()), "id").is_err());
    }

    #[test]
    fn test_patch_tells_absent_from_null() {
        assert_eq!(payload("{}").note, Patch::Keep);
        assert_eq!(payload(r#"{"note": null}"#).note, Patch::Clear);
        assert_eq!(payload(r#"{"note": "  "}"#).note, Patch::Clear);
        assert_eq!(payload(r#"{"note": "Late"}"#).note, Patch::Set("Late".to_string()));
        assert!(!Patch::<String>::Keep.is_write());
        assert!(Patch::<String>::Clear.is_write());
        assert_eq!(Patch::<String>::Clear.as_deref(), None);
    }

    #[test]
    fn test_patch_amount_zero_clears() {
        assert_eq!(
            patch_amount(Patch::Set("0".into()), "price_per_plate"),
            Ok(Patch::Clear)
        );
        assert_eq!(
            patch_amount(Patch::Set("450".into()), "price_per_plate"),
            Ok(Patch::Set(Decimal::from(450)))
        );
        assert_eq!(patch_amount(Patch::Keep, "price_per_plate"), Ok(Patch::Keep));
        assert!(patch_amount(Patch::Set("lots".into()), "price_per_plate").is_err());
    }

    #[test]
    fn test_zero_handling_in_updates() {
        assert_eq!(nonzero_amount(Some("0".into()), "total_amount"), Ok(None));
        assert_eq!(
            nonzero_amount(Some("12.5".into()), "total_amount").unwrap(),
            Some(Decimal::new(125, 1))
        );
        assert_eq!(nonzero_number::<i32>(Some("0".into()), "expected_guests"), Ok(None));
        assert_eq!(
            patch_number::<i32>(Patch::Set("0".into()), "number_of_plates"),
            Ok(Patch::Clear)
        );
    }

    #[test]
    fn test_required_amount_allow_zero() {
        assert_eq!(
            required_amount_allow_zero(Some("0".into()), "final_salary"),
            Ok(Decimal::ZERO)
        );
        assert_eq!(
            required_amount_allow_zero(None, "final_salary"),
            Err(ValidationError::MissingField("final_salary"))
        );
    }
}
