//! Post API integration tests
//!
//! Post creation rules, visibility, likes and the feed.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, TestApp};

#[tokio::test]
async fn test_create_general_post() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "  Hello world  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["content"], "Hello world");
    assert_eq!(body["post_type"], "general");
    assert_eq!(body["author_username"], "alice");
    assert!(body["community_id"].is_null());
    assert_eq!(body["likes"], json!([]));
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let empty = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "   " }))
        .await;
    let too_long = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "x".repeat(2001) }))
        .await;
    let community_without_id = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "hi", "post_type": "community" }))
        .await;
    let general_with_id = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "hi", "community_id": community }))
        .await;

    assert_error(&empty, StatusCode::BAD_REQUEST);
    assert_error(&too_long, StatusCode::BAD_REQUEST);
    assert_error(&community_without_id, StatusCode::BAD_REQUEST);
    assert_error(&general_with_id, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_image_only_post() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "", "image_url": "/uploads/photo.png" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["content"], "");
    assert_eq!(body["image_url"], "/uploads/photo.png");

    let neither = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": " ", "image_url": " " }))
        .await;
    assert_error(&neither, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("posts").await, 1);
}

#[tokio::test]
async fn test_edit_cannot_leave_post_empty() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let post = app
        .create_post(&alice, json!({ "content": "caption", "image_url": "/uploads/photo.png" }))
        .await;

    let caption_removed = app
        .server
        .put(&format!("/api/posts/{post}"))
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "" }))
        .await;
    assert_eq!(caption_removed.status_code(), StatusCode::OK);
    assert_eq!(caption_removed.json::<serde_json::Value>()["content"], "");

    let image_removed = app
        .server
        .put(&format!("/api/posts/{post}"))
        .authorization_bearer(&alice.token)
        .json(&json!({ "image_url": "" }))
        .await;
    assert_error(&image_removed, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_community_post_requires_membership() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "let me in", "post_type": "community", "community_id": community }))
        .await;

    assert_error(&response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_community_post_visible_to_members_only() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;
    let post = app
        .create_post(
            &alice,
            json!({ "content": "secret", "post_type": "community", "community_id": community }),
        )
        .await;

    let outsider = app
        .server
        .get(&format!("/api/posts/{post}"))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&outsider, StatusCode::FORBIDDEN);

    app.join(&bob, community).await;
    let member = app
        .server
        .get(&format!("/api/posts/{post}"))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(member.status_code(), StatusCode::OK);
    assert_eq!(member.json::<serde_json::Value>()["content"], "secret");
}

#[tokio::test]
async fn test_get_unknown_post_is_404() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .get(&format!("/api/posts/{}", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await;

    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_author_can_edit_or_delete() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let post = app.create_post(&alice, json!({ "content": "original" })).await;

    let edit = app
        .server
        .put(&format!("/api/posts/{post}"))
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "vandalised" }))
        .await;
    let delete = app
        .server
        .delete(&format!("/api/posts/{post}"))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&edit, StatusCode::FORBIDDEN);
    assert_error(&delete, StatusCode::FORBIDDEN);

    let edit = app
        .server
        .put(&format!("/api/posts/{post}"))
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "edited" }))
        .await;
    assert_eq!(edit.status_code(), StatusCode::OK);
    assert_eq!(edit.json::<serde_json::Value>()["content"], "edited");

    let delete = app
        .server
        .delete(&format!("/api/posts/{post}"))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_like_post_twice_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let post = app.create_post(&alice, json!({ "content": "like me" })).await;

    let first = app
        .server
        .post(&format!("/api/posts/{post}/like"))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let body: serde_json::Value = first.json();
    assert_eq!(body["like_count"], 1);
    assert_eq!(body["likes"], json!([bob.id]));

    let second = app
        .server
        .post(&format!("/api/posts/{post}/like"))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&second, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("post_likes").await, 1);
}

#[tokio::test]
async fn test_unlike_post() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let post = app.create_post(&alice, json!({ "content": "like me" })).await;

    let not_liked = app
        .server
        .post(&format!("/api/posts/{post}/unlike"))
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&not_liked, StatusCode::BAD_REQUEST);

    app.server
        .post(&format!("/api/posts/{post}/like"))
        .authorization_bearer(&alice.token)
        .await;
    let unliked = app
        .server
        .post(&format!("/api/posts/{post}/unlike"))
        .authorization_bearer(&alice.token)
        .await;

    assert_eq!(unliked.status_code(), StatusCode::OK);
    assert_eq!(unliked.json::<serde_json::Value>()["like_count"], 0);
}

#[tokio::test]
async fn test_feed_contains_ally_and_community_posts_newest_first() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let stranger = app.register("stranger").await;
    let community = app.create_community(&alice, "Rustaceans").await;
    let elsewhere = app.create_community(&stranger, "Elsewhere").await;
    app.join(&bob, community).await;

    let own = app.create_post(&bob, json!({ "content": "mine" })).await;
    let ally = app.create_post(&alice, json!({ "content": "from ally" })).await;
    let inside = app
        .create_post(
            &alice,
            json!({ "content": "in community", "post_type": "community", "community_id": community }),
        )
        .await;
    app.create_post(&stranger, json!({ "content": "from stranger" })).await;
    app.create_post(
        &stranger,
        json!({ "content": "stranger community", "post_type": "community", "community_id": elsewhere }),
    )
    .await;

    let response = app
        .server
        .get("/api/posts/feed")
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let feed: Vec<serde_json::Value> = response.json();
    let ids: Vec<String> = feed
        .iter()
        .map(|post| post["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        ids,
        vec![inside.to_string(), ally.to_string(), own.to_string()]
    );
}

#[tokio::test]
async fn test_feed_excludes_posts_after_ally_removed() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    app.server
        .post("/api/allies")
        .authorization_bearer(&bob.token)
        .json(&json!({ "user_id": alice.id }))
        .await;
    app.create_post(&alice, json!({ "content": "hello ally" })).await;

    let with_ally = app
        .server
        .get("/api/posts/feed")
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(with_ally.json::<Vec<serde_json::Value>>().len(), 1);

    app.server
        .delete(&format!("/api/allies/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await;
    let without_ally = app
        .server
        .get("/api/posts/feed")
        .authorization_bearer(&bob.token)
        .await;
    assert!(without_ally.json::<Vec<serde_json::Value>>().is_empty());
}
