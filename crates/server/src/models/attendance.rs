//! Daily worker attendance models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hotel_desk_core::{AttendanceId, AttendanceStatus};

use super::input::{self, ValidationError};

/// One attendance mark for one worker on one day.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub attendance_date: NaiveDate,
    pub worker_name: String,
    pub role: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for an attendance mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub attendance_date: NaiveDate,
    pub worker_name: String,
    pub role: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Body of `POST /api/attendance`, and each element of the bulk body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkAttendanceRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub attendance_date: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub worker_name: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub role: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub status: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub notes: Option<String>,
}

impl MarkAttendanceRequest {
    /// Check required fields in order, then the status label.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or `InvalidField` for an unknown status.
    pub fn validate(self) -> Result<NewAttendance, ValidationError> {
        let attendance_date = input::required_date(self.attendance_date, "attendance_date")?;
        let worker_name = input::required_text(self.worker_name, "worker_name")?;
        let role = input::required_text(self.role, "role")?;
        let status = input::required_text(self.status, "status")?;
        let status = status
            .parse::<AttendanceStatus>()
            .map_err(|_| ValidationError::InvalidField {
                field: "status",
                reason: format!(
                    "{status}. Must be one of: {}",
                    AttendanceStatus::LABELS.join(", ")
                ),
            })?;

        Ok(NewAttendance {
            attendance_date,
            worker_name,
            role,
            status,
            notes: self.notes,
        })
    }
}

/// Validate a bulk attendance body. Nothing is accepted unless every entry is
/// valid.
///
/// # Errors
///
/// Returns `Malformed` for an empty batch, or the first entry's error with the
/// entry named in the message.
pub fn validate_batch(
    entries: Vec<MarkAttendanceRequest>,
) -> Result<Vec<NewAttendance>, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::Malformed(
            "Attendance data must not be empty".to_string(),
        ));
    }
    entries
        .into_iter()
        .map(|entry| {
            entry.validate().map_err(|err| match err {
                ValidationError::MissingField(_) => {
                    ValidationError::Malformed(format!("{err} in attendance record"))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(json: &str) -> MarkAttendanceRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_half_day_is_accepted() {
        let mark = entry(
            r#"{"attendance_date": "2026-02-01", "worker_name": "Asha", "role": "Cleaner", "status": "Half Day"}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(mark.status, AttendanceStatus::HalfDay);
        assert_eq!(mark.notes, None);
    }

    #[test]
    fn test_unknown_status_lists_choices() {
        let err = entry(
            r#"{"attendance_date": "2026-02-01", "worker_name": "Asha", "role": "Cleaner", "status": "Sick"}"#,
        )
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status: Sick. Must be one of: Present, Absent, Half Day, Leave"
        );
    }

    #[test]
    fn test_missing_field_order() {
        let err = entry(r#"{"worker_name": "Asha"}"#).validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("attendance_date"));
    }

    #[test]
    fn test_batch_rejects_whole_set_on_one_bad_entry() {
        let entries = vec![
            entry(
                r#"{"attendance_date": "2026-02-01", "worker_name": "Asha", "role": "Cleaner", "status": "Present"}"#,
            ),
            entry(r#"{"attendance_date": "2026-02-01", "worker_name": "Vikram", "status": "Present"}"#),
        ];
        let err = validate_batch(entries).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required field: role in attendance record"
        );
    }

    #[test]
    fn test_batch_rejects_empty() {
        assert!(validate_batch(Vec::new()).is_err());
    }
}
