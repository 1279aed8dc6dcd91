//! Staff user domain types.
//!
//! These types represent validated domain objects for staff authentication.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use hotel_desk_core::{LoginLogId, LoginOutcome, UserId, UserRole};

/// A staff user (domain type). The password hash never leaves the repository.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique.
    pub username: String,
    /// Access level.
    pub role: UserRole,
    /// Optional display name.
    pub name: Option<String>,
    /// When the user was provisioned.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The client-facing view of this user.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }
}

/// A user as returned to the browser and kept in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: UserRole,
    pub name: Option<String>,
}

/// One row of the login audit log.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LoginLogEntry {
    pub id: LoginLogId,
    pub username: String,
    pub login_date: NaiveDate,
    pub login_time: NaiveTime,
    pub outcome: LoginOutcome,
    pub attempted_password: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new login audit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoginLog {
    pub username: String,
    pub outcome: LoginOutcome,
    pub attempted_password: Option<String>,
    pub at: DateTime<Utc>,
}

impl NewLoginLog {
    /// A successful login at `at`.
    #[must_use]
    pub fn success(username: &str, at: DateTime<Utc>) -> Self {
        Self {
            username: username.to_owned(),
            outcome: LoginOutcome::Success,
            attempted_password: None,
            at,
        }
    }

    /// A rejected or locked-out attempt at `at`, keeping the attempted password.
    #[must_use]
    pub fn failure(username: &str, attempted_password: &str, at: DateTime<Utc>) -> Self {
        Self {
            username: username.to_owned(),
            outcome: LoginOutcome::Failure,
            attempted_password: Some(attempted_password.to_owned()),
            at,
        }
    }
}
