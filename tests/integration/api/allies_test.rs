//! Ally API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, TestApp};

#[tokio::test]
async fn test_manual_ally_is_symmetric() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let response = app
        .server
        .post("/api/allies")
        .authorization_bearer(&alice.token)
        .json(&json!({ "user_id": bob.id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["id"], bob.id.to_string());
    assert!(body["community_id"].is_null());

    let bobs_allies = app
        .server
        .get("/api/allies")
        .authorization_bearer(&bob.token)
        .await;
    let bobs_allies: serde_json::Value = bobs_allies.json();
    assert_eq!(bobs_allies[0]["user"]["username"], "alice");

    let check = app
        .server
        .get(&format!("/api/allies/check/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(check.json::<serde_json::Value>(), json!({ "is_ally": true }));
}

#[tokio::test]
async fn test_manual_ally_rejections() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let with_self = app
        .server
        .post("/api/allies")
        .authorization_bearer(&alice.token)
        .json(&json!({ "user_id": alice.id }))
        .await;
    let unknown = app
        .server
        .post("/api/allies")
        .authorization_bearer(&alice.token)
        .json(&json!({ "user_id": Uuid::new_v4() }))
        .await;
    assert_error(&with_self, StatusCode::BAD_REQUEST);
    assert_error(&unknown, StatusCode::NOT_FOUND);

    app.server
        .post("/api/allies")
        .authorization_bearer(&alice.token)
        .json(&json!({ "user_id": bob.id }))
        .await;
    let duplicate = app
        .server
        .post("/api/allies")
        .authorization_bearer(&bob.token)
        .json(&json!({ "user_id": alice.id }))
        .await;
    assert_error(&duplicate, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("allies").await, 1);
}

#[tokio::test]
async fn test_community_allies_record_their_community() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;
    app.join(&bob, community).await;

    let response = app
        .server
        .get(&format!("/api/allies/user/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["user"]["id"], bob.id.to_string());
    assert_eq!(body[0]["community_id"], community.to_string());
}

#[tokio::test]
async fn test_remove_ally() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    app.server
        .post("/api/allies")
        .authorization_bearer(&alice.token)
        .json(&json!({ "user_id": bob.id }))
        .await;

    let removed = app
        .server
        .delete(&format!("/api/allies/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(removed.status_code(), StatusCode::NO_CONTENT);

    let missing = app
        .server
        .delete(&format!("/api/allies/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&missing, StatusCode::NOT_FOUND);

    let check = app
        .server
        .get(&format!("/api/allies/check/{}", bob.id))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(check.json::<serde_json::Value>(), json!({ "is_ally": false }));
}

#[tokio::test]
async fn test_allies_of_unknown_user_is_404() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .get(&format!("/api/allies/user/{}", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await;

    assert_error(&response, StatusCode::NOT_FOUND);
}
