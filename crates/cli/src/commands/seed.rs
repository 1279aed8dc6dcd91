//! First-run seed data.
//!
//! Creates the `order_id` counter at zero and two staff accounts
//! (`admin` / `admin123` and `cashier` / `cashier123`). Running it again
//! leaves existing rows untouched, so it is safe in deploy scripts.

use hotel_desk_core::UserRole;
use hotel_desk_server::db::counters::ORDER_COUNTER;
use hotel_desk_server::db::{CounterRepository, RepositoryError, UserRepository};
use hotel_desk_server::services::auth::hash_password;
use hotel_desk_server::services::AuthError;
use thiserror::Error;
use tracing::info;

use super::{ConnectError, connect};

/// Default accounts: username, password, display name, role.
const SEED_USERS: &[(&str, &str, &str, UserRole)] = &[
    ("admin", "admin123", "Administrator", UserRole::Admin),
    ("cashier", "cashier123", "Cashier", UserRole::Cashier),
];

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] AuthError),
}

/// Seed the counter and default users.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn run() -> Result<(), SeedError> {
    let pool = connect().await?;

    CounterRepository::new(&pool).ensure(ORDER_COUNTER).await?;
    info!(counter = ORDER_COUNTER, "Counter ready");

    let users = UserRepository::new(&pool);
    for &(username, password, name, role) in SEED_USERS {
        let hash = hash_password(password)?;
        match users
            .create_if_absent(username, &hash, role, Some(name))
            .await?
        {
            Some(user) => info!(username, role = %user.role, "Created user"),
            None => info!(username, "User already exists, skipping"),
        }
    }

    info!("Seed complete");
    Ok(())
}
