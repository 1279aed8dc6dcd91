//! Request validation and response envelopes through the full router.
//!
//! These run against a pool that never connects: every request here is
//! rejected before the handler reaches the database.

use axum::http::StatusCode;
use hotel_desk_integration_tests::{offline_router, send_json};
use serde_json::json;

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_liveness_does_not_need_database() {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    let response = offline_router()
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 64).await.expect("body");
    assert_eq!(&body[..], b"ok");
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_login_requires_both_fields() {
    let (status, body) = send_json(offline_router(), "POST", "/api/auth", r#"{"username":"admin"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "Username and password are required"})
    );

    let (status, _) = send_json(offline_router(), "POST", "/api/auth", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_without_session_is_unauthorized() {
    let (status, body) = send_json(offline_router(), "GET", "/api/auth/me", "").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not logged in");
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let (status, body) = send_json(offline_router(), "POST", "/api/auth/logout", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Logged out successfully"})
    );
}

// =============================================================================
// Body validation
// =============================================================================

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let (status, body) = send_json(offline_router(), "POST", "/api/workers", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_create_worker_names_missing_field() {
    let (status, body) = send_json(
        offline_router(),
        "POST",
        "/api/workers",
        r#"{"role":"Cook","joining_date":"2026-01-05"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: worker_name");
}

#[tokio::test]
async fn test_create_expense_rejects_bad_date() {
    let (status, body) = send_json(
        offline_router(),
        "POST",
        "/api/daily_expenses",
        r#"{"expense_date":"05/01/2026","title":"Gas","amount":900,"payment_mode":"Cash"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Invalid expense_date"))
    );
}

#[tokio::test]
async fn test_create_order_zero_persons_is_missing() {
    let (status, body) = send_json(
        offline_router(),
        "POST",
        "/api/orders",
        r#"{"order_date":"2026-03-01","customer_name":"Asha","num_of_persons":0,"total_items":2,"total_amount":"240"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: num_of_persons");
}

#[tokio::test]
async fn test_update_without_fields_is_rejected() {
    let (status, body) = send_json(offline_router(), "PUT", "/api/workers", r#"{"id":4}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No fields to update");
}

#[tokio::test]
async fn test_delete_without_id_is_rejected() {
    for uri in [
        "/api/workers",
        "/api/attendance",
        "/api/worker_salary",
        "/api/daily_expenses",
        "/api/banquet_management",
        "/api/thali_menu",
        "/api/menu001",
    ] {
        let (status, body) = send_json(offline_router(), "DELETE", uri, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Missing id", "{uri}");
    }
}

#[tokio::test]
async fn test_delete_order_requires_order_number() {
    let (status, body) = send_json(offline_router(), "DELETE", "/api/orders", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing order_id");
}

// =============================================================================
// Bulk endpoints
// =============================================================================

#[tokio::test]
async fn test_bulk_attendance_requires_array() {
    let (status, body) = send_json(
        offline_router(),
        "POST",
        "/api/worker_attendance",
        r#"{"worker_name":"Ravi","status":"Present"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Attendance data must be an array");
}

#[tokio::test]
async fn test_bulk_attendance_rejects_empty_array() {
    let (status, body) = send_json(offline_router(), "POST", "/api/worker_attendance", "[]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Attendance data must not be empty");
}

#[tokio::test]
async fn test_bulk_salary_validates_every_record_first() {
    let (status, body) = send_json(
        offline_router(),
        "POST",
        "/api/worker_salary",
        r#"[
            {"month_year":"2026-02","worker_name":"Ravi","monthly_salary":12000,"final_salary":12000},
            {"month_year":"2026-02","monthly_salary":9000,"final_salary":9000}
        ]"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required field: worker_name in salary record"
    );
}

// =============================================================================
// Query parameters
// =============================================================================

#[tokio::test]
async fn test_list_rejects_unparseable_date() {
    let (status, body) = send_json(offline_router(), "GET", "/api/orders?date=tomorrow", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
