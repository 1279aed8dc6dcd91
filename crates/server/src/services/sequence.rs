//! Order number sequence.
//!
//! The counter lives in the database; the server keeps no copy. Each call to
//! [`SequenceGenerator::next`] is a single atomic increment, so concurrent
//! handlers never mint the same number.

use std::future::Future;

use sqlx::PgPool;

use hotel_desk_core::OrderNumber;

use crate::db::counters::ORDER_COUNTER;
use crate::db::{CounterRepository, RepositoryError};

/// Storage for named monotonic counters.
pub trait SequenceStore: Send + Sync {
    /// Increment the counter and return the new value. Starts from 0.
    fn increment(&self, key: &str) -> impl Future<Output = Result<i64, RepositoryError>> + Send;

    /// Current value without changing it; 0 for a counter never incremented.
    fn current(&self, key: &str) -> impl Future<Output = Result<i64, RepositoryError>> + Send;
}

impl SequenceStore for CounterRepository<'_> {
    async fn increment(&self, key: &str) -> Result<i64, RepositoryError> {
        CounterRepository::increment(self, key).await
    }

    async fn current(&self, key: &str) -> Result<i64, RepositoryError> {
        CounterRepository::current(self, key).await
    }
}

/// Mints order numbers from the `order_id` counter.
pub struct SequenceGenerator<S> {
    store: S,
}

impl<'a> SequenceGenerator<CounterRepository<'a>> {
    /// Generator over the `hotel.counter` table.
    #[must_use]
    pub const fn for_pool(pool: &'a PgPool) -> Self {
        Self::new(CounterRepository::new(pool))
    }
}

impl<S: SequenceStore> SequenceGenerator<S> {
    /// Create a generator over any [`SequenceStore`].
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Atomically advance the counter and return the new order number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the increment fails and
    /// `RepositoryError::DataCorruption` if the stored value is negative.
    pub async fn next(&self) -> Result<OrderNumber, RepositoryError> {
        let seq = self.store.increment(ORDER_COUNTER).await?;
        let seq = u64::try_from(seq).map_err(|_| {
            RepositoryError::DataCorruption(format!("negative order counter: {seq}"))
        })?;
        tracing::debug!(seq, "Minted order number");
        Ok(OrderNumber::new(seq))
    }

    /// The last minted counter value, for display. Does not advance.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the read fails.
    pub async fn peek(&self) -> Result<i64, RepositoryError> {
        self.store.current(ORDER_COUNTER).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[derive(Default)]
    struct MemoryCounter(AtomicI64);

    impl SequenceStore for MemoryCounter {
        async fn increment(&self, _key: &str) -> Result<i64, RepositoryError> {
            Ok(self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn current(&self, _key: &str) -> Result<i64, RepositoryError> {
            Ok(self.0.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn test_first_and_hundredth() {
        let generator = SequenceGenerator::new(MemoryCounter::default());

        assert_eq!(generator.next().await.unwrap().to_string(), "00000001");
        for _ in 2..100 {
            generator.next().await.unwrap();
        }
        assert_eq!(generator.next().await.unwrap().to_string(), "00000100");
    }

    #[tokio::test]
    async fn test_peek_does_not_advance() {
        let generator = SequenceGenerator::new(MemoryCounter::default());
        assert_eq!(generator.peek().await.unwrap(), 0);

        generator.next().await.unwrap();
        assert_eq!(generator.peek().await.unwrap(), 1);
        assert_eq!(generator.peek().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers_get_distinct_contiguous_values() {
        let generator = SequenceGenerator::new(MemoryCounter::default());

        let minted = futures::future::join_all((0..50).map(|_| generator.next())).await;
        let seqs: HashSet<u64> = minted.into_iter().map(|n| n.unwrap().seq()).collect();

        assert_eq!(seqs, (1..=50).collect());
    }

    #[tokio::test]
    async fn test_negative_counter_is_corruption() {
        let generator = SequenceGenerator::new(MemoryCounter(AtomicI64::new(-5)));
        let err = generator.next().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
