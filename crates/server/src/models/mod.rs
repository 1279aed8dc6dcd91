//! Domain models and request payloads.
//!
//! Records derive `sqlx::FromRow` and `Serialize` and are returned as-is in
//! list responses. Request payloads capture loosely typed JSON through
//! [`input`] and convert to validated `New*`/`*Changes` values.

pub mod attendance;
pub mod banquet;
pub mod expense;
pub mod input;
pub mod menu;
pub mod order;
pub mod salary;
pub mod session;
pub mod user;
pub mod worker;

use serde::Deserialize;

pub use input::ValidationError;
pub use session::keys as session_keys;
pub use user::{LoginLogEntry, NewLoginLog, User, UserProfile};

/// Body of the `DELETE` endpoints addressed by record id.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    #[serde(deserialize_with = "input::scalar")]
    pub id: Option<String>,
}

impl DeleteRequest {
    /// The record id to delete.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` when the id is absent.
    pub fn validate(self) -> Result<i32, ValidationError> {
        input::record_id(self.id, "id")
    }
}
