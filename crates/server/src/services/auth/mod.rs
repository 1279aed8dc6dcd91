//! Staff authentication service.
//!
//! Username/password login guarded by the escalating lockout schedule in
//! [`hotel_desk_core::lockout`]. Every attempt that reaches storage appends
//! exactly one audit row to the login log.

mod error;

pub use error::AuthError;

use std::future::Future;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hotel_desk_core::{SecurityState, UserRole};

use crate::db::{LoginLogRepository, LoginSecurityRepository, UserRepository};
use crate::models::{NewLoginLog, UserProfile};

// =============================================================================
// Bootstrap Accounts
// =============================================================================

/// A fixed login that works before any user has been provisioned.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub role: UserRole,
}

impl BootstrapAccount {
    fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.to_owned(),
            role: self.role,
            name: None,
        }
    }
}

/// Built-in accounts, checked before stored users when enabled by
/// `HOTEL_BOOTSTRAP_ACCOUNTS`.
pub const BOOTSTRAP_ACCOUNTS: &[BootstrapAccount] = &[
    BootstrapAccount {
        username: "admin",
        password: "2026",
        role: UserRole::Admin,
    },
    BootstrapAccount {
        username: "casher123",
        password: "2026",
        role: UserRole::Cashier,
    },
];

fn bootstrap_match(username: &str, password: &str) -> Option<UserProfile> {
    BOOTSTRAP_ACCOUNTS
        .iter()
        .find(|account| account.username == username && account.password == password)
        .map(BootstrapAccount::profile)
}

// =============================================================================
// Storage Seam
// =============================================================================

/// Storage used by the login flow.
pub trait LoginStore: Send + Sync {
    /// The stored user matching these credentials, if any.
    fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, AuthError>> + Send;

    /// Current security state; a username never seen before has the default.
    fn security_state(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<SecurityState, AuthError>> + Send;

    /// Overwrite the security state for a username.
    fn save_security_state(
        &self,
        username: &str,
        state: &SecurityState,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Append one audit row.
    fn append_log(&self, entry: &NewLoginLog)
    -> impl Future<Output = Result<(), AuthError>> + Send;
}

/// [`LoginStore`] over the `hotel` schema.
pub struct PgLoginStore<'a> {
    users: UserRepository<'a>,
    security: LoginSecurityRepository<'a>,
    logs: LoginLogRepository<'a>,
}

impl<'a> PgLoginStore<'a> {
    /// Create a store backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            security: LoginSecurityRepository::new(pool),
            logs: LoginLogRepository::new(pool),
        }
    }
}

impl LoginStore for PgLoginStore<'_> {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserProfile>, AuthError> {
        let Some((user, hash)) = self.users.get_with_password_hash(username).await? else {
            return Ok(None);
        };

        // argon2 verification is CPU-bound
        let password = password.to_owned();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::VerifyTask(e.to_string()))?;

        Ok(verified.then(|| user.profile()))
    }

    async fn security_state(&self, username: &str) -> Result<SecurityState, AuthError> {
        Ok(self.security.get(username).await?)
    }

    async fn save_security_state(
        &self,
        username: &str,
        state: &SecurityState,
    ) -> Result<(), AuthError> {
        Ok(self.security.save(username, state).await?)
    }

    async fn append_log(&self, entry: &NewLoginLog) -> Result<(), AuthError> {
        Ok(self.logs.append(entry).await?)
    }
}

// =============================================================================
// Service
// =============================================================================

/// Result of one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Credentials matched; the sanitized user.
    Authenticated(UserProfile),
    /// Credentials did not match. Also returned for the attempt that starts a lock.
    Rejected,
    /// An earlier failure locked this username; credentials were not checked.
    Locked {
        remaining_minutes: i64,
        lock_until: DateTime<Utc>,
    },
}

/// Staff authentication service.
pub struct AuthService<S> {
    store: S,
    bootstrap_enabled: bool,
}

impl<'a> AuthService<PgLoginStore<'a>> {
    /// Service over the `hotel` schema.
    #[must_use]
    pub const fn for_pool(pool: &'a PgPool, bootstrap_enabled: bool) -> Self {
        Self::new(PgLoginStore::new(pool), bootstrap_enabled)
    }
}

impl<S: LoginStore> AuthService<S> {
    /// Create a service over any [`LoginStore`].
    #[must_use]
    pub const fn new(store: S, bootstrap_enabled: bool) -> Self {
        Self {
            store,
            bootstrap_enabled,
        }
    }

    /// Run one login attempt at instant `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` when either field is empty,
    /// before any storage is touched. Storage failures surface as
    /// `AuthError::Repository` and never as a successful login.
    pub async fn attempt(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let state = self.store.security_state(username).await?;

        if let (Some(remaining_minutes), Some(lock_until)) =
            (state.remaining_minutes(now), state.lock_until)
        {
            self.store
                .append_log(&NewLoginLog::failure(username, password, now))
                .await?;
            tracing::warn!(username = %username, remaining_minutes, "Login attempt while locked");
            return Ok(AttemptOutcome::Locked {
                remaining_minutes,
                lock_until,
            });
        }

        if let Some(profile) = self.authenticate(username, password).await? {
            self.store
                .save_security_state(username, &SecurityState::reset())
                .await?;
            self.store
                .append_log(&NewLoginLog::success(username, now))
                .await?;
            tracing::info!(username = %username, role = %profile.role, "Login successful");
            return Ok(AttemptOutcome::Authenticated(profile));
        }

        let next = state.after_failure(now);
        self.store.save_security_state(username, &next).await?;
        self.store
            .append_log(&NewLoginLog::failure(username, password, now))
            .await?;

        if let Some(lock_until) = next.lock_until {
            tracing::warn!(
                username = %username,
                failed_attempts = next.failed_attempts,
                %lock_until,
                "Account locked after failed login"
            );
        } else {
            tracing::info!(
                username = %username,
                failed_attempts = next.failed_attempts,
                "Failed login"
            );
        }

        Ok(AttemptOutcome::Rejected)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserProfile>, AuthError> {
        if self.bootstrap_enabled
            && let Some(profile) = bootstrap_match(username, password)
        {
            return Ok(Some(profile));
        }
        self.store.verify_credentials(username, password).await
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash. Unparseable hashes never match.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{Duration, TimeZone};
    use hotel_desk_core::LoginOutcome;

    #[derive(Default)]
    struct MemoryStore {
        users: HashMap<String, (String, UserProfile)>,
        security: Mutex<HashMap<String, SecurityState>>,
        logs: Mutex<Vec<NewLoginLog>>,
        comparisons: AtomicUsize,
    }

    impl MemoryStore {
        fn with_user(username: &str, password: &str, role: UserRole) -> Self {
            let mut store = Self::default();
            store.users.insert(
                username.to_owned(),
                (
                    password.to_owned(),
                    UserProfile {
                        username: username.to_owned(),
                        role,
                        name: Some("Front Desk".to_owned()),
                    },
                ),
            );
            store
        }

        fn state(&self, username: &str) -> SecurityState {
            self.security
                .lock()
                .unwrap()
                .get(username)
                .copied()
                .unwrap_or_default()
        }

        fn log_count(&self) -> usize {
            self.logs.lock().unwrap().len()
        }
    }

    impl LoginStore for MemoryStore {
        async fn verify_credentials(
            &self,
            username: &str,
            password: &str,
        ) -> Result<Option<UserProfile>, AuthError> {
            self.comparisons.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .users
                .get(username)
                .filter(|(stored, _)| stored == password)
                .map(|(_, profile)| profile.clone()))
        }

        async fn security_state(&self, username: &str) -> Result<SecurityState, AuthError> {
            Ok(self.state(username))
        }

        async fn save_security_state(
            &self,
            username: &str,
            state: &SecurityState,
        ) -> Result<(), AuthError> {
            self.security
                .lock()
                .unwrap()
                .insert(username.to_owned(), *state);
            Ok(())
        }

        async fn append_log(&self, entry: &NewLoginLog) -> Result<(), AuthError> {
            self.logs.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    fn service() -> AuthService<MemoryStore> {
        AuthService::new(
            MemoryStore::with_user("ravi", "correct-horse", UserRole::Cashier),
            true,
        )
    }

    #[tokio::test]
    async fn test_stored_user_login() {
        let auth = service();
        let outcome = auth.attempt("ravi", "correct-horse", t0()).await.unwrap();

        let AttemptOutcome::Authenticated(profile) = outcome else {
            panic!("expected authenticated, got {outcome:?}");
        };
        assert_eq!(profile.username, "ravi");
        assert_eq!(profile.role, UserRole::Cashier);

        let logs = auth.store.logs.lock().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].outcome, LoginOutcome::Success);
        assert_eq!(logs[0].attempted_password, None);
    }

    #[tokio::test]
    async fn test_bootstrap_accounts() {
        let auth = service();

        let outcome = auth.attempt("admin", "2026", t0()).await.unwrap();
        assert!(matches!(
            outcome,
            AttemptOutcome::Authenticated(ref p) if p.role == UserRole::Admin
        ));

        let outcome = auth.attempt("casher123", "2026", t0()).await.unwrap();
        assert!(matches!(
            outcome,
            AttemptOutcome::Authenticated(ref p) if p.role == UserRole::Cashier
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_accounts_can_be_disabled() {
        let auth = AuthService::new(MemoryStore::default(), false);
        let outcome = auth.attempt("admin", "2026", t0()).await.unwrap();
        assert_eq!(outcome, AttemptOutcome::Rejected);
    }

    #[tokio::test]
    async fn test_three_failures_lock_for_five_minutes() {
        let auth = service();
        let now = t0();

        for _ in 0..3 {
            let outcome = auth.attempt("ravi", "wrong", now).await.unwrap();
            assert_eq!(outcome, AttemptOutcome::Rejected);
        }

        let state = auth.store.state("ravi");
        assert_eq!(state.failed_attempts, 3);
        assert_eq!(state.lock_until, Some(now + Duration::minutes(5)));

        let comparisons = auth.store.comparisons.load(Ordering::SeqCst);
        let outcome = auth.attempt("ravi", "correct-horse", now).await.unwrap();
        assert_eq!(
            outcome,
            AttemptOutcome::Locked {
                remaining_minutes: 5,
                lock_until: now + Duration::minutes(5),
            }
        );
        // locked attempts skip the credential check and keep the counter
        assert_eq!(auth.store.comparisons.load(Ordering::SeqCst), comparisons);
        assert_eq!(auth.store.state("ravi").failed_attempts, 3);
        assert_eq!(auth.store.log_count(), 4);
    }

    #[tokio::test]
    async fn test_remaining_minutes_decrease() {
        let auth = service();
        let now = t0();
        for _ in 0..3 {
            auth.attempt("ravi", "wrong", now).await.unwrap();
        }

        let remaining = |outcome: AttemptOutcome| match outcome {
            AttemptOutcome::Locked {
                remaining_minutes, ..
            } => remaining_minutes,
            other => panic!("expected locked, got {other:?}"),
        };

        let first = remaining(auth.attempt("ravi", "x", now).await.unwrap());
        let later = remaining(
            auth.attempt("ravi", "x", now + Duration::seconds(150))
                .await
                .unwrap(),
        );
        let last = remaining(
            auth.attempt("ravi", "x", now + Duration::seconds(290))
                .await
                .unwrap(),
        );
        assert_eq!((first, later, last), (5, 3, 1));
    }

    #[tokio::test]
    async fn test_lockout_escalation_scenario() {
        let auth = service();
        let mut now = t0();

        for _ in 0..3 {
            auth.attempt("ravi", "wrong", now).await.unwrap();
        }
        assert!(matches!(
            auth.attempt("ravi", "wrong", now).await.unwrap(),
            AttemptOutcome::Locked {
                remaining_minutes: 5,
                ..
            }
        ));

        now += Duration::minutes(5) + Duration::seconds(1);
        for expected in [4, 5] {
            assert_eq!(
                auth.attempt("ravi", "wrong", now).await.unwrap(),
                AttemptOutcome::Rejected
            );
            let state = auth.store.state("ravi");
            assert_eq!(state.failed_attempts, expected);
            assert!(!state.is_locked(now));
        }

        auth.attempt("ravi", "wrong", now).await.unwrap();
        assert_eq!(
            auth.store.state("ravi").lock_until,
            Some(now + Duration::minutes(10))
        );

        now += Duration::minutes(10) + Duration::seconds(1);
        auth.attempt("ravi", "wrong", now).await.unwrap();
        let state = auth.store.state("ravi");
        assert_eq!(state.failed_attempts, 7);
        assert_eq!(state.lock_until, Some(now + Duration::minutes(30)));
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let auth = service();
        let now = t0();

        auth.attempt("ravi", "wrong", now).await.unwrap();
        auth.attempt("ravi", "wrong", now).await.unwrap();
        auth.attempt("ravi", "correct-horse", now).await.unwrap();
        assert_eq!(auth.store.state("ravi"), SecurityState::reset());

        auth.attempt("ravi", "wrong", now).await.unwrap();
        assert_eq!(auth.store.state("ravi").failed_attempts, 1);
    }

    #[tokio::test]
    async fn test_failure_logs_attempted_password() {
        let auth = service();
        auth.attempt("ravi", "hunter2", t0()).await.unwrap();

        let logs = auth.store.logs.lock().unwrap();
        assert_eq!(logs[0].outcome, LoginOutcome::Failure);
        assert_eq!(logs[0].attempted_password.as_deref(), Some("hunter2"));
    }

    #[tokio::test]
    async fn test_missing_credentials_touch_nothing() {
        let auth = service();
        let now = t0();
        auth.attempt("ravi", "wrong", now).await.unwrap();
        let before = auth.store.state("ravi");

        let err = auth.attempt("ravi", "", now).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
        let err = auth.attempt("", "secret", now).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));

        assert_eq!(auth.store.state("ravi"), before);
        assert_eq!(auth.store.log_count(), 1);
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_invalid_hash_never_matches() {
        assert!(!verify_password("2026", "2026"));
    }
}
