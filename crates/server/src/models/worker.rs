//! Worker roster models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hotel_desk_core::WorkerId;

use super::input::{self, Patch, ValidationError};

/// A worker on the roster.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Worker {
    pub id: WorkerId,
    pub worker_name: String,
    pub mobile_no: Option<String>,
    pub role: String,
    pub joining_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub worker_name: String,
    pub role: String,
    pub joining_date: NaiveDate,
    pub mobile_no: Option<String>,
}

/// Partial update of a worker. `None` and `Patch::Keep` leave the column
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerChanges {
    pub worker_name: Option<String>,
    pub mobile_no: Patch<String>,
    pub role: Option<String>,
    pub joining_date: Option<NaiveDate>,
}

/// Body of `POST /api/workers`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateWorkerRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub worker_name: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub role: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub joining_date: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub mobile_no: Option<String>,
}

impl CreateWorkerRequest {
    /// Check required fields in order and convert.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewWorker, ValidationError> {
        Ok(NewWorker {
            worker_name: input::required_text(self.worker_name, "worker_name")?,
            role: input::required_text(self.role, "role")?,
            joining_date: input::required_date(self.joining_date, "joining_date")?,
            mobile_no: self.mobile_no,
        })
    }
}

/// Body of `PUT /api/workers`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateWorkerRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub id: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub worker_name: Option<String>,
    #[serde(deserialize_with = "input::patch")]
    pub mobile_no: Patch<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub role: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub joining_date: Option<String>,
}

impl UpdateWorkerRequest {
    /// Resolve the target id and the changed columns.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` without an id and `NoFieldsToUpdate` when nothing
    /// would change.
    pub fn validate(self) -> Result<(WorkerId, WorkerChanges), ValidationError> {
        let id = WorkerId::new(input::record_id(self.id, "id")?);
        let changes = WorkerChanges {
            worker_name: self.worker_name,
            mobile_no: self.mobile_no,
            role: self.role,
            joining_date: input::optional_date(self.joining_date, "joining_date")?,
        };
        if changes == WorkerChanges::default() {
            return Err(ValidationError::NoFieldsToUpdate);
        }
        Ok((id, changes))
    }
}
