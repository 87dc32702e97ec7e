//! Subscription HTTP Handlers
//!
//! Subscribing joins the community (with ally fan-out) and canceling leaves
//! it. Expiry is applied lazily whenever a user lists their subscriptions.

use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::communities::{db as communities_db, membership};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::AuthUser;
use crate::backend::server::config::begin_write;
use crate::shared::social::{CreateSubscriptionRequest, Subscription, SubscriptionStatus};

/// Subscribe to a community on the free plan
pub async fn create_subscription(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<Subscription>), BackendError> {
    let community_id = request.community_id;
    let mut tx = begin_write(&pool).await?;

    if communities_db::get_community(&mut *tx, community_id).await?.is_none() {
        return Err(BackendError::not_found("Community not found"));
    }
    if db::has_active_subscription(&mut *tx, auth.user_id, community_id).await? {
        return Err(BackendError::bad_request("Already subscribed to this community"));
    }

    let subscription_id = db::insert_subscription(&mut *tx, auth.user_id, community_id)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                BackendError::bad_request("Already subscribed to this community")
            } else {
                err.into()
            }
        })?;

    if !communities_db::is_member(&mut *tx, community_id, auth.user_id).await? {
        membership::join(&mut *tx, community_id, auth.user_id).await?;
    }

    let subscription = db::get_subscription(&mut *tx, subscription_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Subscription not found"))?;
    tx.commit().await?;
    tracing::info!("User {} subscribed to community {}", auth.user_id, community_id);

    Ok((StatusCode::CREATED, Json(subscription)))
}

/// The caller's subscriptions, newest first
pub async fn get_my_subscriptions(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Subscription>>, BackendError> {
    let expired = db::expire_overdue(&pool, auth.user_id, Utc::now()).await?;
    if expired > 0 {
        tracing::info!("Expired {} subscriptions for {}", expired, auth.user_id);
    }

    let subscriptions = db::list_for_user(&pool, auth.user_id).await?;
    Ok(Json(subscriptions))
}

/// Subscriptions of a community, visible to its creator only
pub async fn get_community_subscriptions(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<Vec<Subscription>>, BackendError> {
    let community = communities_db::get_community(&pool, community_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Community not found"))?;
    if community.creator_id != auth.user_id {
        return Err(BackendError::forbidden(
            "Only the community creator can view its subscriptions",
        ));
    }

    let subscriptions = db::list_for_community(&pool, community_id).await?;
    Ok(Json(subscriptions))
}

/// Cancel an active subscription and leave the community, unless the owner
/// created it
pub async fn cancel_subscription(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> Result<Json<Subscription>, BackendError> {
    let now = Utc::now();
    let mut tx = begin_write(&pool).await?;

    let subscription = db::get_subscription(&mut *tx, subscription_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Subscription not found"))?;
    if subscription.user_id != auth.user_id {
        return Err(BackendError::forbidden("You can only cancel your own subscriptions"));
    }
    if subscription.status_at(now) != SubscriptionStatus::Active {
        return Err(BackendError::bad_request("Subscription is not active"));
    }

    db::cancel_subscription(&mut *tx, subscription_id, now).await?;

    let community = communities_db::get_community(&mut *tx, subscription.community_id).await?;
    let is_creator = community.is_some_and(|c| c.creator_id == auth.user_id);
    if !is_creator {
        communities_db::remove_member(&mut *tx, subscription.community_id, auth.user_id).await?;
    }

    let canceled = db::get_subscription(&mut *tx, subscription_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Subscription not found"))?;
    tx.commit().await?;
    tracing::info!("Subscription {} canceled by {}", subscription_id, auth.user_id);

    Ok(Json(canceled))
}
