//! Subcommand implementations.
//!
//! Every command reads `HOTEL_DATABASE_URL` (and the rest of the server
//! configuration) through [`HotelConfig::from_env`], so a `.env` file shared
//! with the server works unchanged.

pub mod counter;
pub mod migrate;
pub mod seed;
pub mod user;

use hotel_desk_server::config::{ConfigError, HotelConfig};
use hotel_desk_server::db;
use sqlx::PgPool;

/// One-off commands never need more than a couple of connections.
const CLI_MAX_CONNECTIONS: u32 = 2;

/// Load configuration and open a small pool.
async fn connect() -> Result<PgPool, ConnectError> {
    let config = HotelConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, CLI_MAX_CONNECTIONS).await?;
    Ok(pool)
}

/// Errors opening the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}
