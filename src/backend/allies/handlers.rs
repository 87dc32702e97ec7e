//! Ally HTTP Handlers
//!
//! Allies are normally created by joining communities; these handlers also
//! allow direct edges and their removal.

use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::AuthUser;
use crate::shared::social::{AllyCheckResponse, AllyPair, AllyResponse, CreateAllyRequest};

fn pair_with(caller: Uuid, other: Uuid) -> Result<AllyPair, BackendError> {
    AllyPair::new(caller, other).ok_or_else(|| BackendError::bad_request("You cannot ally with yourself"))
}

pub async fn list_my_allies(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<AllyResponse>>, BackendError> {
    let allies = db::list_allies(&pool, auth.user_id).await?;
    Ok(Json(allies))
}

pub async fn list_user_allies(
    State(pool): State<SqlitePool>,
    AuthUser(_auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AllyResponse>>, BackendError> {
    if get_user_by_id(&pool, user_id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }
    let allies = db::list_allies(&pool, user_id).await?;
    Ok(Json(allies))
}

/// Create a direct ally edge with another user
pub async fn create_ally(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateAllyRequest>,
) -> Result<(StatusCode, Json<AllyResponse>), BackendError> {
    let pair = pair_with(auth.user_id, request.user_id)?;
    let other = get_user_by_id(&pool, request.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !db::insert_pair(&pool, pair, None).await? {
        return Err(BackendError::bad_request("Already allies"));
    }
    tracing::info!("Ally edge created between {} and {}", auth.user_id, request.user_id);

    Ok((
        StatusCode::CREATED,
        Json(AllyResponse {
            user: other.to_summary(),
            community_id: None,
            since: Utc::now(),
        }),
    ))
}

pub async fn remove_ally(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let pair = pair_with(auth.user_id, user_id)?;
    if !db::delete_pair(&pool, pair).await? {
        return Err(BackendError::not_found("Ally relationship not found"));
    }
    tracing::info!("Ally edge removed between {} and {}", auth.user_id, user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_ally(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AllyCheckResponse>, BackendError> {
    let is_ally = match AllyPair::new(auth.user_id, user_id) {
        Some(pair) => db::pair_exists(&pool, pair).await?,
        None => false,
    };
    Ok(Json(AllyCheckResponse { is_ally }))
}
