//! Comment HTTP Handlers
//!
//! Comments follow the visibility of their post: a community post's
//! comments are for members only.

use axum::{extract::State, http::StatusCode};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::likes::{add_like, list_likes, remove_like, LikeTarget};
use crate::backend::middleware::AuthUser;
use crate::backend::posts::load_visible_post;
use crate::shared::social::{
    build_thread, Comment, CommentNode, CreateCommentRequest, LikesResponse, UpdateCommentRequest,
};
use crate::shared::validation;

async fn find_comment(pool: &SqlitePool, comment_id: Uuid) -> Result<Comment, BackendError> {
    db::get_comment(pool, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))
}

pub async fn create_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    let content = validation::required_text("content", &request.content, validation::COMMENT_CONTENT_MAX)?;
    load_visible_post(&pool, request.post_id, auth.user_id).await?;

    if let Some(parent_id) = request.parent_comment_id {
        let parent = db::get_comment(&pool, parent_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Parent comment not found"))?;
        if parent.post_id != request.post_id {
            return Err(BackendError::bad_request(
                "Parent comment belongs to a different post",
            ));
        }
    }

    let comment = db::create_comment(
        &pool,
        request.post_id,
        auth.user_id,
        &content,
        request.parent_comment_id,
    )
    .await?;
    tracing::info!("Comment {} on post {} by {}", comment.id, comment.post_id, auth.user_id);

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Comments of a post arranged as reply trees, oldest first
pub async fn get_post_comments(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<CommentNode>>, BackendError> {
    load_visible_post(&pool, post_id, auth.user_id).await?;
    let comments = db::list_comments_for_post(&pool, post_id).await?;
    Ok(Json(build_thread(comments)))
}

pub async fn update_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<Uuid>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<Comment>, BackendError> {
    let comment = find_comment(&pool, comment_id).await?;
    if comment.author_id != auth.user_id {
        return Err(BackendError::forbidden("You can only edit your own comments"));
    }

    let content = validation::required_text("content", &request.content, validation::COMMENT_CONTENT_MAX)?;
    db::update_comment(&pool, comment_id, &content).await?;

    let mut updated = find_comment(&pool, comment_id).await?;
    updated.likes = list_likes(&pool, LikeTarget::Comment, comment_id).await?;
    Ok(Json(updated))
}

/// Delete a comment. Allowed for its author and for the author of the post.
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let comment = find_comment(&pool, comment_id).await?;

    if comment.author_id != auth.user_id {
        let post = load_visible_post(&pool, comment.post_id, auth.user_id).await?;
        if post.author_id != auth.user_id {
            return Err(BackendError::forbidden(
                "Only the comment author or the post author can delete this comment",
            ));
        }
    }

    db::delete_comment(&pool, comment_id).await?;
    tracing::info!("Comment {} deleted by {}", comment_id, auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<LikesResponse>, BackendError> {
    let comment = find_comment(&pool, comment_id).await?;
    load_visible_post(&pool, comment.post_id, auth.user_id).await?;

    if !add_like(&pool, LikeTarget::Comment, comment_id, auth.user_id).await? {
        return Err(BackendError::bad_request("Comment already liked"));
    }

    let likes = list_likes(&pool, LikeTarget::Comment, comment_id).await?;
    Ok(Json(LikesResponse::from(likes)))
}

pub async fn unlike_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<LikesResponse>, BackendError> {
    let comment = find_comment(&pool, comment_id).await?;
    load_visible_post(&pool, comment.post_id, auth.user_id).await?;

    if !remove_like(&pool, LikeTarget::Comment, comment_id, auth.user_id).await? {
        return Err(BackendError::bad_request("Comment has not been liked yet"));
    }

    let likes = list_likes(&pool, LikeTarget::Comment, comment_id).await?;
    Ok(Json(LikesResponse::from(likes)))
}
