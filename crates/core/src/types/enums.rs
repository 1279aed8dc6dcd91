//! Role and status enums shared by the server and the CLI.
//!
//! The string forms are part of the JSON contract with the browser pages, so
//! each enum serializes to exactly the label the pages display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing one of the enums from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Staff role with different access levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "hotel.user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to every module.
    Admin,
    /// Front counter: expenses, salaries and the cashier dashboard.
    Cashier,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Cashier => write!(f, "cashier"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = ParseEnumError;

    /// Case-insensitive; the legacy seed data used `Admin` and `Cashier`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "cashier" => Ok(Self::Cashier),
            _ => Err(ParseEnumError::new("user role", s)),
        }
    }
}

/// Daily attendance mark for a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "hotel.attendance_status"))]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Half Day")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "Half Day"))]
    HalfDay,
    Leave,
}

impl AttendanceStatus {
    /// All accepted labels, in the order they are listed in error messages.
    pub const LABELS: [&'static str; 4] = ["Present", "Absent", "Half Day", "Leave"];

    /// Label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::HalfDay => "Half Day",
            Self::Leave => "Leave",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            "Half Day" => Ok(Self::HalfDay),
            "Leave" => Ok(Self::Leave),
            _ => Err(ParseEnumError::new("attendance status", s)),
        }
    }
}

/// How an expense or a banquet advance was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "hotel.payment_mode"))]
pub enum PaymentMode {
    Cash,
    #[serde(rename = "UPI")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "UPI"))]
    Upi,
    Card,
    Bank,
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Upi => write!(f, "UPI"),
            Self::Card => write!(f, "Card"),
            Self::Bank => write!(f, "Bank"),
        }
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(Self::Cash),
            "UPI" => Ok(Self::Upi),
            "Card" => Ok(Self::Card),
            "Bank" => Ok(Self::Bank),
            _ => Err(ParseEnumError::new("payment mode", s)),
        }
    }
}

/// Lifecycle of a banquet booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "hotel.booking_status"))]
pub enum BookingStatus {
    #[default]
    Tentative,
    Confirmed,
    Completed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tentative => write!(f, "Tentative"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tentative" => Ok(Self::Tentative),
            "Confirmed" => Ok(Self::Confirmed),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError::new("booking status", s)),
        }
    }
}

/// Outcome recorded in the login audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "hotel.login_outcome", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    Success,
    Failure,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_parse_is_case_insensitive() {
        assert_eq!("Admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("cashier".parse::<UserRole>(), Ok(UserRole::Cashier));
        assert!("waiter".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Cashier).ok();
        assert_eq!(json.as_deref(), Some("\"cashier\""));
    }

    #[test]
    fn test_attendance_half_day_label() {
        assert_eq!(
            "Half Day".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::HalfDay)
        );
        let json = serde_json::to_string(&AttendanceStatus::HalfDay).ok();
        assert_eq!(json.as_deref(), Some("\"Half Day\""));
        assert!("half day".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_attendance_labels_match_display() {
        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::HalfDay,
            AttendanceStatus::Leave,
        ];
        for (status, label) in statuses.iter().zip(AttendanceStatus::LABELS) {
            assert_eq!(status.to_string(), label);
        }
    }

    #[test]
    fn test_payment_mode_upi() {
        assert_eq!("UPI".parse::<PaymentMode>(), Ok(PaymentMode::Upi));
        assert_eq!(PaymentMode::Upi.to_string(), "UPI");
    }

    #[test]
    fn test_booking_status_default_is_tentative() {
        assert_eq!(BookingStatus::default(), BookingStatus::Tentative);
    }

    #[test]
    fn test_parse_error_message() {
        let err = "Paypal".parse::<PaymentMode>().unwrap_err();
        assert_eq!(err.to_string(), "invalid payment mode: Paypal");
    }
}
