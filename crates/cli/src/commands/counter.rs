//! Order counter inspection.

use hotel_desk_core::OrderNumber;
use hotel_desk_server::db::RepositoryError;
use hotel_desk_server::services::SequenceGenerator;
use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur while reading the counter.
#[derive(Debug, Error)]
pub enum CounterError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Print the current sequence value and the order number the next order
/// will receive. Does not advance the counter.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn show() -> Result<(), CounterError> {
    let pool = connect().await?;
    let seq = SequenceGenerator::for_pool(&pool).peek().await?;
    let next = OrderNumber::new(u64::try_from(seq).unwrap_or(0) + 1);

    #[allow(clippy::print_stdout)]
    {
        println!("order_id seq: {seq}");
        println!("next order:   {next}");
    }
    Ok(())
}
