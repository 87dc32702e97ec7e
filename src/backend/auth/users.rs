/**
 * User Model and Database Operations
 *
 * This module handles the stored user record and its queries. The password
 * hash never leaves this module except through `User`, which is not
 * serializable; handlers convert to `UserResponse` / `UserSummary`.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::social::{UserResponse, UserSummary};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, bio, avatar_url, created_at, updated_at";

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    /// Username (unique, case-insensitive)
    pub username: String,
    /// Email address, stored lowercase
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            bio: self.bio.clone(),
            avatar_url: self.avatar_url.clone(),
            created_at: self.created_at,
        }
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Fields for a new account; values are already validated
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

/// Create a new user
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    let query = format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, full_name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.full_name)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    sqlx::query_as::<_, User>(&query)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by username (case-insensitive)
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    sqlx::query_as::<_, User>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Replace the editable profile fields
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    full_name: Option<&str>,
    bio: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<User, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE users
        SET full_name = ?, bio = ?, avatar_url = ?, updated_at = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(full_name)
        .bind(bio)
        .bind(avatar_url)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Delete a user; dependent rows cascade
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
