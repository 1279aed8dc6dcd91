//! Staff authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during staff authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password absent from the request.
    #[error("Username and password are required")]
    MissingCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// The blocking verification task was cancelled or panicked.
    #[error("password verification task failed: {0}")]
    VerifyTask(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
