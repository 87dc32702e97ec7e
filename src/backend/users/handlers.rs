//! User HTTP Handlers
//!
//! Profile lookup, search, profile editing and account deletion.

use axum::{extract::State, http::StatusCode};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::{delete_user, get_user_by_id, update_profile};
use crate::backend::communities::db::list_communities_for_user;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::middleware::AuthUser;
use crate::backend::posts::db::list_general_posts_by_author;
use crate::backend::posts::load_post_likes;
use crate::shared::social::{
    Community, Post, UpdateProfileRequest, UserProfile, UserResponse, UserSearchQuery, UserSummary,
};
use crate::shared::validation;

const AVATAR_URL_MAX: usize = 500;

/// List or search users
pub async fn list_users(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let users = db::search_users(&pool, search).await?;
    Ok(Json(users))
}

/// Public profile with ally, community and post counts
pub async fn get_user_profile(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>, BackendError> {
    let user = get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    let counts = db::profile_counts(&pool, user_id).await?;

    Ok(Json(UserProfile {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        bio: user.bio,
        avatar_url: user.avatar_url,
        created_at: user.created_at,
        ally_count: counts.ally_count,
        community_count: counts.community_count,
        post_count: counts.post_count,
    }))
}

/// Update the caller's profile. Absent fields are kept, blank ones cleared.
pub async fn update_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let full_name = match request.full_name.as_deref() {
        Some(raw) => validation::optional_text("full_name", Some(raw), validation::FULL_NAME_MAX)?,
        None => user.full_name,
    };
    let bio = match request.bio.as_deref() {
        Some(raw) => validation::optional_text("bio", Some(raw), validation::BIO_MAX)?,
        None => user.bio,
    };
    let avatar_url = match request.avatar_url.as_deref() {
        Some(raw) => validation::optional_text("avatar_url", Some(raw), AVATAR_URL_MAX)?,
        None => user.avatar_url,
    };

    let updated = update_profile(
        &pool,
        auth.user_id,
        full_name.as_deref(),
        bio.as_deref(),
        avatar_url.as_deref(),
    )
    .await?;
    tracing::info!("Profile updated for user {}", auth.user_id);

    Ok(Json(updated.to_response()))
}

/// Delete the caller's account and everything that references it
pub async fn delete_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<StatusCode, BackendError> {
    if !delete_user(&pool, auth.user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }
    tracing::info!("Account deleted: {}", auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Communities a user belongs to
pub async fn get_user_communities(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Community>>, BackendError> {
    if get_user_by_id(&pool, user_id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }
    let communities = list_communities_for_user(&pool, user_id).await?;
    Ok(Json(communities))
}

/// A user's general posts, newest first
pub async fn get_user_posts(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Post>>, BackendError> {
    if get_user_by_id(&pool, user_id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }
    let posts = list_general_posts_by_author(&pool, user_id).await?;
    let posts = load_post_likes(&pool, posts).await?;
    Ok(Json(posts))
}
