//! Staff user management commands.
//!
//! # Usage
//!
//! ```bash
//! hotel-cli user create -u priya -p 's3cret' -r cashier -n "Priya"
//! hotel-cli user logins -u priya -l 20
//! ```

use hotel_desk_core::{LoginOutcome, UserId, UserRole};
use hotel_desk_server::db::{LoginLogRepository, RepositoryError, UserRepository};
use hotel_desk_server::services::auth::hash_password;
use hotel_desk_server::services::AuthError;
use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Invalid role: {0}. Valid roles: admin, cashier")]
    InvalidRole(String),

    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] AuthError),

    #[error("Database error: {0}")]
    Repository(RepositoryError),
}

/// Create a staff user.
///
/// # Errors
///
/// Returns an error if the role is unknown, the username is taken or the
/// database write fails.
pub async fn create_user(
    username: &str,
    password: &str,
    role: &str,
    name: Option<&str>,
) -> Result<UserId, UserError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;

    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(UserError::EmptyCredentials);
    }

    let hash = hash_password(password)?;
    let pool = connect().await?;

    tracing::info!("Creating user: {} ({})", username, role);
    let user = UserRepository::new(&pool)
        .create(username, &hash, role, name)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UserExists(username.to_owned()),
            other => UserError::Repository(other),
        })?;

    tracing::info!(id = %user.id, "User created");
    Ok(user.id)
}

/// Print the most recent login attempts for `username`, newest first.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn recent_logins(username: &str, limit: i64) -> Result<(), UserError> {
    let pool = connect().await?;
    let entries = LoginLogRepository::new(&pool)
        .recent_for(username, limit.max(1))
        .await
        .map_err(UserError::Repository)?;

    if entries.is_empty() {
        tracing::info!(username, "No login attempts recorded");
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for entry in &entries {
            let outcome = match entry.outcome {
                LoginOutcome::Success => "success",
                LoginOutcome::Failure => "FAILED",
            };
            println!(
                "{} {}  {:<7}  {}",
                entry.login_date,
                entry.login_time.format("%H:%M:%S"),
                outcome,
                entry.attempted_password.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}
