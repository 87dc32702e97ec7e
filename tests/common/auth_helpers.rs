//! Authentication test helpers
//!
//! Builds a `TestServer` around the full application and registers users
//! through the public API.

use allynet::backend::auth::handlers::AuthResponse;
use allynet::backend::auth::sessions::create_token;
use allynet::backend::server::{create_app, ServerConfig};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;

use super::database::TestDatabase;

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const TEST_PASSWORD: &str = "password123";

/// A running application with its own database
pub struct TestApp {
    pub server: TestServer,
    pub db: TestDatabase,
    pub config: ServerConfig,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_max_upload_bytes(1024 * 1024).await
    }

    pub async fn with_max_upload_bytes(max_upload_bytes: usize) -> Self {
        let db = TestDatabase::new().await;
        let config = ServerConfig::builder()
            .database_url(db.url())
            .jwt_secret(TEST_JWT_SECRET)
            .bcrypt_cost(4)
            .upload_dir(db.upload_dir())
            .max_upload_bytes(max_upload_bytes)
            .build()
            .expect("Invalid test config");

        let app = create_app(config.clone())
            .await
            .expect("Failed to create app");
        let server = TestServer::new(app).expect("Failed to start test server");

        Self { server, db, config }
    }

    /// Register `username` with `<username>@example.com` and the test password
    pub async fn register(&self, username: &str) -> TestUser {
        let email = format!("{username}@example.com");
        let response = self
            .server
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "register {username}");

        let body: AuthResponse = response.json();
        TestUser {
            id: body.user.id,
            username: body.user.username,
            email: body.user.email,
            token: body.token,
        }
    }

    /// Create a community owned by `owner` and return its id
    pub async fn create_community(&self, owner: &TestUser, name: &str) -> Uuid {
        let response = self
            .server
            .post("/api/communities")
            .authorization_bearer(&owner.token)
            .json(&json!({ "name": name, "description": format!("About {name}") }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "create {name}");
        id_of(&response.json())
    }

    pub async fn join(&self, user: &TestUser, community_id: Uuid) -> serde_json::Value {
        let response = self
            .server
            .post(&format!("/api/communities/{community_id}/join"))
            .authorization_bearer(&user.token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "join {community_id}");
        response.json()
    }

    /// Create a post as `author` and return its id
    pub async fn create_post(&self, author: &TestUser, body: serde_json::Value) -> Uuid {
        let response = self
            .server
            .post("/api/posts")
            .authorization_bearer(&author.token)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "create post");
        id_of(&response.json())
    }

    /// Sign a token directly, bypassing login
    pub fn token_for(&self, user_id: Uuid, email: &str) -> String {
        create_token(&self.config, user_id, email).expect("Failed to sign token")
    }
}

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Extract the `id` field of a JSON object
pub fn id_of(body: &serde_json::Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("Response has no id")
}
