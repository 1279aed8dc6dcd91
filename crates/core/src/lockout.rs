//! Login lockout arithmetic.
//!
//! Pure functions over a username's security state. The server feeds these the
//! stored record and the current instant; nothing here touches storage or the
//! clock.
//!
//! Schedule by consecutive failure count:
//!
//! | failures | lock |
//! |----------|------|
//! | 1-2      | none |
//! | 3        | 5 minutes |
//! | 4-5      | none |
//! | 6        | 10 minutes |
//! | n >= 7   | 10 * 3^(n-6) minutes |

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Failure count that triggers the first short lock.
pub const FIRST_LOCK_AT: u32 = 3;
/// Length of the first short lock.
pub const FIRST_LOCK_MINUTES: u64 = 5;
/// Failure count from which locks escalate.
pub const ESCALATION_START: u32 = 6;
/// Lock length at [`ESCALATION_START`].
pub const ESCALATION_BASE_MINUTES: u64 = 10;
/// Multiplier applied for every failure past [`ESCALATION_START`].
pub const ESCALATION_FACTOR: u64 = 3;

/// Maps a consecutive failure count to a lock length.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockoutSchedule;

impl LockoutSchedule {
    /// Lock length in minutes after `failed_attempts` consecutive failures,
    /// or `None` when that count does not lock.
    #[must_use]
    pub fn lock_minutes(failed_attempts: u32) -> Option<u64> {
        match failed_attempts {
            FIRST_LOCK_AT => Some(FIRST_LOCK_MINUTES),
            n if n < ESCALATION_START => None,
            n => {
                let steps = n - ESCALATION_START;
                let factor = ESCALATION_FACTOR.saturating_pow(steps);
                Some(ESCALATION_BASE_MINUTES.saturating_mul(factor))
            }
        }
    }
}

/// Per-username failure counter and lock deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecurityState {
    pub failed_attempts: u32,
    pub lock_until: Option<DateTime<Utc>>,
}

impl SecurityState {
    /// A lock is active only while `lock_until` is strictly in the future.
    #[must_use]
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lock_until.is_some_and(|until| until > now)
    }

    /// Whole minutes left on an active lock, rounded up, so at least 1 while
    /// locked. `None` when unlocked.
    #[must_use]
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        let until = self.lock_until.filter(|until| *until > now)?;
        let remaining = until - now;
        let whole = remaining.num_minutes();
        Some(if remaining > Duration::minutes(whole) {
            whole + 1
        } else {
            whole
        })
    }

    /// State after one more failed attempt at `now`.
    ///
    /// The lock deadline is clamped to the largest representable instant.
    #[must_use]
    pub fn after_failure(&self, now: DateTime<Utc>) -> Self {
        let failed_attempts = self.failed_attempts.saturating_add(1);
        let lock_until =
            LockoutSchedule::lock_minutes(failed_attempts).map(|minutes| lock_deadline(now, minutes));
        Self {
            failed_attempts,
            lock_until,
        }
    }

    /// State after a successful login.
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            failed_attempts: 0,
            lock_until: None,
        }
    }
}

fn lock_deadline(now: DateTime<Utc>, minutes: u64) -> DateTime<Utc> {
    i64::try_from(minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_schedule_table() {
        assert_eq!(LockoutSchedule::lock_minutes(0), None);
        assert_eq!(LockoutSchedule::lock_minutes(1), None);
        assert_eq!(LockoutSchedule::lock_minutes(2), None);
        assert_eq!(LockoutSchedule::lock_minutes(3), Some(5));
        assert_eq!(LockoutSchedule::lock_minutes(4), None);
        assert_eq!(LockoutSchedule::lock_minutes(5), None);
        assert_eq!(LockoutSchedule::lock_minutes(6), Some(10));
        assert_eq!(LockoutSchedule::lock_minutes(7), Some(30));
        assert_eq!(LockoutSchedule::lock_minutes(8), Some(90));
        assert_eq!(LockoutSchedule::lock_minutes(9), Some(270));
    }

    #[test]
    fn test_schedule_saturates() {
        assert_eq!(LockoutSchedule::lock_minutes(200), Some(u64::MAX));
        assert_eq!(LockoutSchedule::lock_minutes(u32::MAX), Some(u64::MAX));
    }

    #[test]
    fn test_third_failure_locks_for_five_minutes() {
        let now = t0();
        let state = SecurityState::default()
            .after_failure(now)
            .after_failure(now)
            .after_failure(now);
        assert_eq!(state.failed_attempts, 3);
        assert_eq!(state.lock_until, Some(now + Duration::minutes(5)));
        assert!(state.is_locked(now));
        assert_eq!(state.remaining_minutes(now), Some(5));
    }

    #[test]
    fn test_first_two_failures_do_not_lock() {
        let state = SecurityState::default().after_failure(t0());
        assert_eq!(state.lock_until, None);
        let state = state.after_failure(t0());
        assert_eq!(state.lock_until, None);
        assert!(!state.is_locked(t0()));
    }

    #[test]
    fn test_remaining_minutes_rounds_up_and_decreases() {
        let now = t0();
        let state = SecurityState {
            failed_attempts: 3,
            lock_until: Some(now + Duration::minutes(5)),
        };
        assert_eq!(state.remaining_minutes(now + Duration::seconds(1)), Some(5));
        assert_eq!(state.remaining_minutes(now + Duration::seconds(61)), Some(4));
        assert_eq!(
            state.remaining_minutes(now + Duration::seconds(299)),
            Some(1)
        );
        let almost = now + Duration::minutes(5) - Duration::microseconds(500);
        assert_eq!(state.remaining_minutes(almost), Some(1));
        let last_nano = now + Duration::minutes(5) - Duration::nanoseconds(1);
        assert_eq!(state.remaining_minutes(last_nano), Some(1));
        assert_eq!(state.remaining_minutes(now + Duration::minutes(5)), None);
    }

    #[test]
    fn test_lock_expires_at_deadline() {
        let now = t0();
        let state = SecurityState {
            failed_attempts: 3,
            lock_until: Some(now),
        };
        assert!(!state.is_locked(now));
        assert!(state.is_locked(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_gap_then_escalation() {
        let mut now = t0();
        let mut state = SecurityState::default();
        for _ in 0..3 {
            state = state.after_failure(now);
        }
        now += Duration::minutes(6);
        assert!(!state.is_locked(now));

        state = state.after_failure(now);
        assert_eq!((state.failed_attempts, state.lock_until), (4, None));
        state = state.after_failure(now);
        assert_eq!((state.failed_attempts, state.lock_until), (5, None));
        state = state.after_failure(now);
        assert_eq!(state.lock_until, Some(now + Duration::minutes(10)));

        now += Duration::minutes(11);
        state = state.after_failure(now);
        assert_eq!(state.failed_attempts, 7);
        assert_eq!(state.lock_until, Some(now + Duration::minutes(30)));
    }

    #[test]
    fn test_huge_lock_clamps_to_max() {
        let state = SecurityState {
            failed_attempts: 99,
            lock_until: None,
        }
        .after_failure(t0());
        assert_eq!(state.lock_until, Some(DateTime::<Utc>::MAX_UTC));
        assert!(state.is_locked(t0()));
    }

    #[test]
    fn test_reset_clears_everything() {
        assert_eq!(SecurityState::reset(), SecurityState::default());
    }
}
