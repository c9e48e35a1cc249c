//! Integration tests for the session flow.
//!
//! These tests require:
//! - A running MySQL database with migrations applied
//! - The server running (cargo run -p veranda-server)
//! - The seeded superadmin (cargo run -p veranda-cli -- seed)
//!
//! Run with: cargo test -p veranda-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use veranda_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_signin_round_trip() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/auth/user"))
        .send()
        .await
        .expect("Failed to fetch session user");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["user"]["role"], "superadmin");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_signin_failures_are_uniform() {
    let ctx = TestContext::new();

    let unknown_email = ctx
        .client
        .post(ctx.url("/api/auth/signin"))
        .json(&json!({ "email": "nobody@example.com", "password": "admin123" }))
        .send()
        .await
        .expect("request failed");
    let wrong_password = ctx
        .client
        .post(ctx.url("/api/auth/signin"))
        .json(&json!({ "email": "admin@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let a: Value = unknown_email.json().await.expect("body");
    let b: Value = wrong_password.json().await.expect("body");
    assert_eq!(a["error"], b["error"], "messages must not reveal which part failed");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_signin_missing_fields_is_bad_request() {
    let ctx = TestContext::new();
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/signin"))
        .json(&json!({ "email": "admin@example.com" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_admin_routes_require_session() {
    let ctx = TestContext::new();
    let resp = ctx
        .client
        .get(ctx.url("/api/admin/features"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("body");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_signout_clears_session() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/signout"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url("/api/auth/user"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
