//! Post HTTP Handlers
//!
//! General posts are visible to everyone signed in; community posts only to
//! members of their community. Only the author may edit or delete a post.

use axum::{extract::State, http::StatusCode};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db::{self, NewPost};
use crate::backend::communities::db::{get_community, is_member};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::likes::{add_like, list_likes, remove_like, LikeTarget};
use crate::backend::middleware::AuthUser;
use crate::shared::social::{
    assemble_feed, CreatePostRequest, LikesResponse, Post, PostType, UpdatePostRequest,
};
use crate::shared::validation;

const IMAGE_URL_MAX: usize = 500;

/// Load a post the viewer is allowed to see, with its likes
pub async fn load_visible_post(
    pool: &SqlitePool,
    post_id: Uuid,
    viewer_id: Uuid,
) -> Result<Post, BackendError> {
    let mut post = db::get_post(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    if let Some(community_id) = post.community_id {
        if !is_member(pool, community_id, viewer_id).await? {
            tracing::warn!("User {} denied access to community post {}", viewer_id, post_id);
            return Err(BackendError::forbidden(
                "You must be a member of this community to view this post",
            ));
        }
    }

    post.likes = list_likes(pool, LikeTarget::Post, post.id).await?;
    Ok(post)
}

pub async fn create_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), BackendError> {
    let (content, image_url) = validation::post_body(
        Some(request.content.as_str()),
        request.image_url.as_deref(),
        IMAGE_URL_MAX,
    )?;

    let community_id = match (request.post_type, request.community_id) {
        (PostType::General, None) => None,
        (PostType::General, Some(_)) => {
            return Err(BackendError::bad_request(
                "community_id is only allowed on community posts",
            ));
        }
        (PostType::Community, None) => {
            return Err(BackendError::bad_request(
                "community_id is required for community posts",
            ));
        }
        (PostType::Community, Some(community_id)) => {
            if get_community(&pool, community_id).await?.is_none() {
                return Err(BackendError::not_found("Community not found"));
            }
            if !is_member(&pool, community_id, auth.user_id).await? {
                return Err(BackendError::forbidden(
                    "You must be a member of this community to post in it",
                ));
            }
            Some(community_id)
        }
    };

    let post = db::create_post(
        &pool,
        NewPost {
            author_id: auth.user_id,
            content: &content,
            image_url: image_url.as_deref(),
            post_type: request.post_type,
            community_id,
        },
    )
    .await?;
    tracing::info!("Post {} created by {} ({})", post.id, auth.user_id, post.post_type.as_str());

    Ok((StatusCode::CREATED, Json(post)))
}

/// General posts from the caller and their allies plus community posts from
/// joined communities, newest first
pub async fn get_feed(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Post>>, BackendError> {
    let general = db::list_ally_general_posts(&pool, auth.user_id).await?;
    let community = db::list_joined_community_posts(&pool, auth.user_id).await?;

    let feed = assemble_feed(general, community);
    let feed = db::load_post_likes(&pool, feed).await?;
    tracing::debug!("Feed for {}: {} posts", auth.user_id, feed.len());

    Ok(Json(feed))
}

pub async fn get_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Post>, BackendError> {
    let post = load_visible_post(&pool, post_id, auth.user_id).await?;
    Ok(Json(post))
}

pub async fn update_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;
    if post.author_id != auth.user_id {
        return Err(BackendError::forbidden("You can only edit your own posts"));
    }

    // Absent fields keep their stored value; the merged post must still have a body
    let (content, image_url) = validation::post_body(
        request.content.as_deref().or(Some(post.content.as_str())),
        request.image_url.as_deref().or(post.image_url.as_deref()),
        IMAGE_URL_MAX,
    )?;

    db::update_post(&pool, post_id, &content, image_url.as_deref()).await?;
    let updated = load_visible_post(&pool, post_id, auth.user_id).await?;
    Ok(Json(updated))
}

pub async fn delete_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;
    if post.author_id != auth.user_id {
        return Err(BackendError::forbidden("You can only delete your own posts"));
    }

    db::delete_post(&pool, post_id).await?;
    tracing::info!("Post {} deleted by {}", post_id, auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikesResponse>, BackendError> {
    load_visible_post(&pool, post_id, auth.user_id).await?;

    if !add_like(&pool, LikeTarget::Post, post_id, auth.user_id).await? {
        return Err(BackendError::bad_request("Post already liked"));
    }

    let likes = list_likes(&pool, LikeTarget::Post, post_id).await?;
    Ok(Json(LikesResponse::from(likes)))
}

pub async fn unlike_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikesResponse>, BackendError> {
    load_visible_post(&pool, post_id, auth.user_id).await?;

    if !remove_like(&pool, LikeTarget::Post, post_id, auth.user_id).await? {
        return Err(BackendError::bad_request("Post has not been liked yet"));
    }

    let likes = list_likes(&pool, LikeTarget::Post, post_id).await?;
    Ok(Json(LikesResponse::from(likes)))
}
