//! Community HTTP Handlers
//!
//! Creating, browsing, editing, joining and leaving communities.
//! Join runs in a transaction so membership and ally edges land together.

use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{db, membership};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::extract::{Json, Path, Query};
use crate::backend::middleware::AuthUser;
use crate::backend::posts::db::{list_community_posts, load_post_likes};
use crate::backend::server::config::begin_write;
use crate::backend::subscriptions::db::cancel_active_for;
use crate::shared::social::{
    Community, CommunityDetail, CommunitySearchQuery, CreateCommunityRequest,
    JoinCommunityResponse, Post, UpdateCommunityRequest, UserSummary,
};
use crate::shared::validation;

const IMAGE_URL_MAX: usize = 500;

async fn find_community(pool: &SqlitePool, community_id: Uuid) -> Result<Community, BackendError> {
    db::get_community(pool, community_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Community not found"))
}

fn name_taken(err: sqlx::Error) -> BackendError {
    if is_unique_violation(&err) {
        BackendError::bad_request("Community with this name already exists")
    } else {
        err.into()
    }
}

/// Create a community; the creator becomes its first member
pub async fn create_community(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateCommunityRequest>,
) -> Result<(StatusCode, Json<Community>), BackendError> {
    let name = validation::community_name(&request.name)?;
    let description = validation::optional_text(
        "description",
        request.description.as_deref(),
        validation::DESCRIPTION_MAX,
    )?
    .unwrap_or_default();
    let image_url = validation::optional_text("image_url", request.image_url.as_deref(), IMAGE_URL_MAX)?;

    if db::get_community_by_name(&pool, &name).await?.is_some() {
        tracing::warn!("Community creation rejected, name taken: {}", name);
        return Err(BackendError::bad_request("Community with this name already exists"));
    }

    let mut tx = begin_write(&pool).await?;
    let community_id = db::insert_community(&mut *tx, auth.user_id, &name, &description, image_url.as_deref())
        .await
        .map_err(name_taken)?;
    db::add_member(&mut *tx, community_id, auth.user_id).await?;
    tx.commit().await?;

    let community = find_community(&pool, community_id).await?;
    tracing::info!("Community {} ({}) created by {}", community.name, community.id, auth.user_id);

    Ok((StatusCode::CREATED, Json(community)))
}

pub async fn list_communities(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Query(query): Query<CommunitySearchQuery>,
) -> Result<Json<Vec<Community>>, BackendError> {
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let communities = db::list_communities(&pool, search).await?;
    Ok(Json(communities))
}

/// Community with members and whether the caller belongs to it
pub async fn get_community(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<CommunityDetail>, BackendError> {
    let community = find_community(&pool, community_id).await?;
    let members = db::list_members(&pool, community_id).await?;
    let is_member = members.iter().any(|member| member.id == auth.user_id);

    Ok(Json(CommunityDetail {
        community,
        members,
        is_member,
    }))
}

pub async fn update_community(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
    Json(request): Json<UpdateCommunityRequest>,
) -> Result<Json<Community>, BackendError> {
    let community = find_community(&pool, community_id).await?;
    if community.creator_id != auth.user_id {
        return Err(BackendError::forbidden("Only the creator can edit this community"));
    }

    let name = match request.name.as_deref() {
        Some(raw) => {
            let name = validation::community_name(raw)?;
            if let Some(existing) = db::get_community_by_name(&pool, &name).await? {
                if existing.id != community_id {
                    return Err(BackendError::bad_request("Community with this name already exists"));
                }
            }
            name
        }
        None => community.name,
    };
    let description = match request.description.as_deref() {
        Some(raw) => validation::optional_text("description", Some(raw), validation::DESCRIPTION_MAX)?
            .unwrap_or_default(),
        None => community.description,
    };
    let image_url = match request.image_url.as_deref() {
        Some(raw) => validation::optional_text("image_url", Some(raw), IMAGE_URL_MAX)?,
        None => community.image_url,
    };

    db::update_community(&pool, community_id, &name, &description, image_url.as_deref())
        .await
        .map_err(name_taken)?;
    tracing::info!("Community {} updated by {}", community_id, auth.user_id);

    let updated = find_community(&pool, community_id).await?;
    Ok(Json(updated))
}

pub async fn delete_community(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let community = find_community(&pool, community_id).await?;
    if community.creator_id != auth.user_id {
        return Err(BackendError::forbidden("Only the creator can delete this community"));
    }

    db::delete_community(&pool, community_id).await?;
    tracing::info!("Community {} deleted by {}", community_id, auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Join a community and become allies with all of its members
pub async fn join_community(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<JoinCommunityResponse>, BackendError> {
    let mut tx = begin_write(&pool).await?;

    if db::get_community(&mut *tx, community_id).await?.is_none() {
        return Err(BackendError::not_found("Community not found"));
    }
    if db::is_member(&mut *tx, community_id, auth.user_id).await? {
        return Err(BackendError::bad_request("Already a member of this community"));
    }

    let allies_created = membership::join(&mut *tx, community_id, auth.user_id).await?;
    tx.commit().await?;

    let community = find_community(&pool, community_id).await?;
    Ok(Json(JoinCommunityResponse {
        community,
        allies_created,
    }))
}

/// Leave a community. Ally edges made through it are kept.
pub async fn leave_community(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<Community>, BackendError> {
    let community = find_community(&pool, community_id).await?;
    if community.creator_id == auth.user_id {
        return Err(BackendError::bad_request("The creator cannot leave their own community"));
    }

    let mut tx = begin_write(&pool).await?;
    if !db::remove_member(&mut *tx, community_id, auth.user_id).await? {
        return Err(BackendError::bad_request("Not a member of this community"));
    }
    cancel_active_for(&mut *tx, auth.user_id, community_id, Utc::now()).await?;
    tx.commit().await?;
    tracing::info!("User {} left community {}", auth.user_id, community_id);

    let community = find_community(&pool, community_id).await?;
    Ok(Json(community))
}

pub async fn list_members(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    find_community(&pool, community_id).await?;
    let members = db::list_members(&pool, community_id).await?;
    Ok(Json(members))
}

/// Posts in a community, visible to members only
pub async fn get_community_posts(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<Vec<Post>>, BackendError> {
    find_community(&pool, community_id).await?;
    if !db::is_member(&pool, community_id, auth.user_id).await? {
        return Err(BackendError::forbidden(
            "You must be a member of this community to view its posts",
        ));
    }

    let posts = list_community_posts(&pool, community_id).await?;
    let posts = load_post_likes(&pool, posts).await?;
    Ok(Json(posts))
}
