//! Authentication API integration tests
//!
//! Registration, login, the current-account endpoint and token checks.

use axum::body::Bytes;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "Alice@Example.com",
            "password": TEST_PASSWORD,
            "full_name": "Alice Liddell"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["full_name"], "Alice Liddell");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": TEST_PASSWORD
        }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("users").await, 1);
}

#[tokio::test]
async fn test_register_duplicate_username_ignores_case() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "ALICE",
            "email": "other@example.com",
            "password": TEST_PASSWORD
        }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_invalid_fields() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "username": "ab", "email": "ab@example.com", "password": TEST_PASSWORD }),
        json!({ "username": "9lives", "email": "cat@example.com", "password": TEST_PASSWORD }),
        json!({ "username": "bob", "email": "not-an-email", "password": TEST_PASSWORD }),
        json!({ "username": "bob", "email": "bob@example.com", "password": "12345" }),
    ];

    for body in cases {
        let response = app.server.post("/api/auth/register").json(&body).await;
        assert_error(&response, StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.db.count("users").await, 0);
}

#[tokio::test]
async fn test_register_malformed_bodies_get_json_errors() {
    let app = TestApp::new().await;

    let missing_email = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;
    assert_error(&missing_email, StatusCode::BAD_REQUEST);
    assert!(missing_email.json::<serde_json::Value>()["error"]
        .as_str()
        .is_some_and(|message| message.contains("email")));

    let truncated = app
        .server
        .post("/api/auth/register")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"username\": "))
        .await;
    assert_error(&truncated, StatusCode::BAD_REQUEST);

    let not_json = app
        .server
        .post("/api/auth/register")
        .text("username=alice")
        .await;
    assert_error(&not_json, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert_eq!(app.db.count("users").await, 0);
}

#[tokio::test]
async fn test_malformed_path_id_gets_json_error() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .get("/api/posts/not-a-uuid")
        .authorization_bearer(&alice.token)
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "ALICE@example.com", "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["id"], alice.id.to_string());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrongpassword" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;

    assert_error(&wrong_password, StatusCode::UNAUTHORIZED);
    assert_error(&unknown_email, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<serde_json::Value>()["error"],
        unknown_email.json::<serde_json::Value>()["error"]
    );
}

#[tokio::test]
async fn test_get_me_with_valid_token() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .get("/api/auth/me")
        .authorization_bearer(&alice.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let missing = app.server.get("/api/auth/me").await;
    let garbage = app
        .server
        .get("/api/posts/feed")
        .authorization_bearer("not-a-jwt")
        .await;

    assert_error(&missing, StatusCode::UNAUTHORIZED);
    assert_error(&garbage, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), "ghost@example.com");

    let response = app
        .server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/does-not-exist").await;

    assert_error(&response, StatusCode::NOT_FOUND);
}
