//! Community API integration tests
//!
//! Includes the ally fan-out that happens when a user joins.

use std::future::IntoFuture;

use allynet::backend::communities::db::list_member_ids;
use axum::http::StatusCode;
use futures_util::future::join_all;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, user_ids, TestApp};

#[tokio::test]
async fn test_create_community_makes_creator_a_member() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .post("/api/communities")
        .authorization_bearer(&alice.token)
        .json(&json!({ "name": "Rustaceans", "description": "Crabs welcome" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Rustaceans");
    assert_eq!(body["creator_id"], alice.id.to_string());
    assert_eq!(body["member_count"], 1);
}

#[tokio::test]
async fn test_community_name_is_unique_ignoring_case() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    app.create_community(&alice, "Rustaceans").await;

    let response = app
        .server
        .post("/api/communities")
        .authorization_bearer(&alice.token)
        .json(&json!({ "name": "rustaceans" }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("communities").await, 1);
}

#[tokio::test]
async fn test_create_community_validates_name() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let too_long = "x".repeat(51);

    for name in ["ab", "   ", too_long.as_str()] {
        let response = app
            .server
            .post("/api/communities")
            .authorization_bearer(&alice.token)
            .json(&json!({ "name": name }))
            .await;
        assert_error(&response, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_join_creates_ally_edges_with_all_existing_members() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let carol = app.register("carol").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let bob_join = app.join(&bob, community).await;
    assert_eq!(bob_join["allies_created"], 1);

    let carol_join = app.join(&carol, community).await;
    assert_eq!(carol_join["allies_created"], 2);
    assert_eq!(carol_join["community"]["member_count"], 3);

    let members = list_member_ids(app.db.pool(), community).await.expect("members");
    assert_eq!(members.len(), 3);
    assert!(members.contains(&carol.id));

    // alice-bob, alice-carol, bob-carol
    assert_eq!(app.db.count("allies").await, 3);

    let check = app
        .server
        .get(&format!("/api/allies/check/{}", alice.id))
        .authorization_bearer(&carol.token)
        .await;
    assert_eq!(check.json::<serde_json::Value>(), json!({ "is_ally": true }));
}

#[tokio::test]
async fn test_join_skips_existing_allies() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let first = app.create_community(&alice, "First").await;
    let second = app.create_community(&alice, "Second").await;

    app.join(&bob, first).await;
    let again = app.join(&bob, second).await;

    assert_eq!(again["allies_created"], 0);
    assert_eq!(app.db.count("allies").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_all_succeed() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let mut joiners = Vec::new();
    for n in 1..=8 {
        joiners.push(app.register(&format!("member{n}")).await);
    }

    let url = format!("/api/communities/{community}/join");
    let responses = join_all(joiners.iter().map(|user| {
        app.server
            .post(&url)
            .authorization_bearer(&user.token)
            .into_future()
    }))
    .await;

    let statuses: Vec<StatusCode> = responses.iter().map(|r| r.status_code()).collect();
    assert_eq!(statuses, vec![StatusCode::OK; 8]);

    // Joins are serialized, so the n-th joiner allies with the n members before it
    let created: u64 = responses
        .iter()
        .map(|r| r.json::<serde_json::Value>()["allies_created"].as_u64().expect("count"))
        .sum();
    assert_eq!(created, 36);

    let members = list_member_ids(app.db.pool(), community).await.expect("members");
    assert_eq!(members.len(), 9);
    assert_eq!(app.db.count("allies").await, 36);
}

#[tokio::test]
async fn test_join_twice_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let response = app
        .server
        .post(&format!("/api/communities/{community}/join"))
        .authorization_bearer(&alice.token)
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_join_unknown_community_is_404() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .server
        .post(&format!("/api/communities/{}/join", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await;

    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_leave_keeps_allies() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;
    app.join(&bob, community).await;

    let response = app
        .server
        .post(&format!("/api/communities/{community}/leave"))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["member_count"], 1);
    assert_eq!(app.db.count("allies").await, 1);

    let again = app
        .server
        .post(&format!("/api/communities/{community}/leave"))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&again, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_creator_cannot_leave() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let response = app
        .server
        .post(&format!("/api/communities/{community}/leave"))
        .authorization_bearer(&alice.token)
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_community_lists_members() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;

    let before = app
        .server
        .get(&format!("/api/communities/{community}"))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(before.json::<serde_json::Value>()["is_member"], false);

    app.join(&bob, community).await;
    let after = app
        .server
        .get(&format!("/api/communities/{community}"))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(after.status_code(), StatusCode::OK);
    let body: serde_json::Value = after.json();
    assert_eq!(body["is_member"], true);
    assert_eq!(body["name"], "Rustaceans");
    assert_eq!(
        user_ids(&body["members"]),
        vec![alice.id.to_string(), bob.id.to_string()]
    );

    let members = app
        .server
        .get(&format!("/api/communities/{community}/members"))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(user_ids(&members.json()).len(), 2);
}

#[tokio::test]
async fn test_list_communities_with_search() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    app.create_community(&alice, "Rustaceans").await;
    app.create_community(&alice, "Gophers").await;

    let all = app
        .server
        .get("/api/communities")
        .authorization_bearer(&alice.token)
        .await;
    let filtered = app
        .server
        .get("/api/communities")
        .add_query_param("search", "rust")
        .authorization_bearer(&alice.token)
        .await;

    assert_eq!(all.json::<Vec<serde_json::Value>>().len(), 2);
    let filtered: Vec<serde_json::Value> = filtered.json();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["name"], "Rustaceans");
}

#[tokio::test]
async fn test_only_creator_can_update_or_delete() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;
    app.join(&bob, community).await;

    let update = app
        .server
        .put(&format!("/api/communities/{community}"))
        .authorization_bearer(&bob.token)
        .json(&json!({ "description": "hijacked" }))
        .await;
    let delete = app
        .server
        .delete(&format!("/api/communities/{community}"))
        .authorization_bearer(&bob.token)
        .await;

    assert_error(&update, StatusCode::FORBIDDEN);
    assert_error(&delete, StatusCode::FORBIDDEN);

    let update = app
        .server
        .put(&format!("/api/communities/{community}"))
        .authorization_bearer(&alice.token)
        .json(&json!({ "description": "Crabs only" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::OK);
    let body: serde_json::Value = update.json();
    assert_eq!(body["description"], "Crabs only");
    assert_eq!(body["name"], "Rustaceans");

    let delete = app
        .server
        .delete(&format!("/api/communities/{community}"))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(app.db.count("community_members").await, 0);
    // Ally edges outlive the community that created them
    assert_eq!(app.db.count("allies").await, 1);
}

#[tokio::test]
async fn test_community_posts_are_members_only() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let community = app.create_community(&alice, "Rustaceans").await;
    app.create_post(
        &alice,
        json!({ "content": "inside", "post_type": "community", "community_id": community }),
    )
    .await;

    let outsider = app
        .server
        .get(&format!("/api/communities/{community}/posts"))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&outsider, StatusCode::FORBIDDEN);

    app.join(&bob, community).await;
    let member = app
        .server
        .get(&format!("/api/communities/{community}/posts"))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(member.status_code(), StatusCode::OK);
    let posts: Vec<serde_json::Value> = member.json();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["content"], "inside");
}
