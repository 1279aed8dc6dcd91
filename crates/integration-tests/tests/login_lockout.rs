//! Lockout escalation against `PostgreSQL`.
//!
//! Requires `HOTEL_TEST_DATABASE_URL` pointing at a scratch database.
//!
//! Run with: cargo test -p hotel-desk-integration-tests -- --ignored

use axum::http::StatusCode;
use chrono::{DateTime, Duration, TimeZone, Utc};
use hotel_desk_core::UserRole;
use hotel_desk_integration_tests::{router_for, send_json, test_pool, unique_username};
use hotel_desk_server::db::{LoginLogRepository, LoginSecurityRepository, UserRepository};
use hotel_desk_server::services::auth::hash_password;
use hotel_desk_server::services::{AttemptOutcome, AuthService};
use sqlx::PgPool;

const PASSWORD: &str = "correct-horse";

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
        .single()
        .expect("valid instant")
}

async fn create_cashier(pool: &PgPool, prefix: &str) -> String {
    let username = unique_username(prefix);
    let hash = hash_password(PASSWORD).expect("hash");
    UserRepository::new(pool)
        .create(&username, &hash, UserRole::Cashier, Some("Test Cashier"))
        .await
        .expect("create user");
    username
}

// =============================================================================
// Service level
// =============================================================================

#[tokio::test]
#[ignore = "Requires HOTEL_TEST_DATABASE_URL"]
async fn test_third_failure_locks_and_success_resets() {
    let Some((pool, _)) = test_pool().await else {
        return;
    };
    let username = create_cashier(&pool, "lockout").await;
    let auth = AuthService::for_pool(&pool, false);

    for _ in 0..3 {
        let outcome = auth.attempt(&username, "wrong", t0()).await.expect("attempt");
        assert!(matches!(outcome, AttemptOutcome::Rejected));
    }

    let state = LoginSecurityRepository::new(&pool)
        .get(&username)
        .await
        .expect("state");
    assert_eq!(state.failed_attempts, 3);
    assert_eq!(state.lock_until, Some(t0() + Duration::minutes(5)));

    // Correct password is refused while locked
    let outcome = auth
        .attempt(&username, PASSWORD, t0() + Duration::minutes(1))
        .await
        .expect("attempt");
    match outcome {
        AttemptOutcome::Locked {
            remaining_minutes, ..
        } => assert_eq!(remaining_minutes, 4),
        other => panic!("expected lock, got {other:?}"),
    }

    let outcome = auth
        .attempt(&username, PASSWORD, t0() + Duration::minutes(6))
        .await
        .expect("attempt");
    assert!(matches!(outcome, AttemptOutcome::Authenticated(_)));

    let state = LoginSecurityRepository::new(&pool)
        .get(&username)
        .await
        .expect("state");
    assert_eq!(state.failed_attempts, 0);
    assert_eq!(state.lock_until, None);

    // 3 failures + 1 locked attempt + 1 success
    let log = LoginLogRepository::new(&pool)
        .recent_for(&username, 10)
        .await
        .expect("log");
    assert_eq!(log.len(), 5);
}

#[tokio::test]
#[ignore = "Requires HOTEL_TEST_DATABASE_URL"]
async fn test_sixth_failure_locks_for_ten_minutes() {
    let Some((pool, _)) = test_pool().await else {
        return;
    };
    let username = create_cashier(&pool, "escalate").await;
    let auth = AuthService::for_pool(&pool, false);

    let mut now = t0();
    for _ in 0..3 {
        auth.attempt(&username, "wrong", now).await.expect("attempt");
    }
    now += Duration::minutes(6);
    for _ in 0..3 {
        auth.attempt(&username, "wrong", now).await.expect("attempt");
    }

    let state = LoginSecurityRepository::new(&pool)
        .get(&username)
        .await
        .expect("state");
    assert_eq!(state.failed_attempts, 6);
    assert_eq!(state.lock_until, Some(now + Duration::minutes(10)));
}

#[tokio::test]
#[ignore = "Requires HOTEL_TEST_DATABASE_URL"]
async fn test_unknown_username_is_tracked() {
    let Some((pool, _)) = test_pool().await else {
        return;
    };
    let username = unique_username("ghost");
    let auth = AuthService::for_pool(&pool, false);

    let outcome = auth.attempt(&username, "guess", t0()).await.expect("attempt");
    assert!(matches!(outcome, AttemptOutcome::Rejected));

    let state = LoginSecurityRepository::new(&pool)
        .get(&username)
        .await
        .expect("state");
    assert_eq!(state.failed_attempts, 1);
}

// =============================================================================
// HTTP level
// =============================================================================

#[tokio::test]
#[ignore = "Requires HOTEL_TEST_DATABASE_URL"]
async fn test_locked_login_returns_429_envelope() {
    let Some((pool, url)) = test_pool().await else {
        return;
    };
    let username = create_cashier(&pool, "http-lock").await;
    let wrong = format!(r#"{{"username":"{username}","password":"wrong"}}"#);
    let right = format!(r#"{{"username":"{username}","password":"{PASSWORD}"}}"#);

    for _ in 0..3 {
        let (status, body) = send_json(router_for(pool.clone(), &url), "POST", "/api/auth", &wrong).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password");
    }

    let (status, body) = send_json(router_for(pool.clone(), &url), "POST", "/api/auth", &right).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(body["locked"], true);
    assert_eq!(body["remainingMinutes"], 5);
    assert!(body["lock_until"].is_string());
}

#[tokio::test]
#[ignore = "Requires HOTEL_TEST_DATABASE_URL"]
async fn test_successful_login_returns_profile_without_hash() {
    let Some((pool, url)) = test_pool().await else {
        return;
    };
    let username = create_cashier(&pool, "http-ok").await;
    let right = format!(r#"{{"username":"{username}","password":"{PASSWORD}"}}"#);

    let (status, body) = send_json(router_for(pool, &url), "POST", "/api/auth", &right).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], username.as_str());
    assert_eq!(body["user"]["role"], "cashier");
    assert!(body["user"].get("password_hash").is_none());
}
