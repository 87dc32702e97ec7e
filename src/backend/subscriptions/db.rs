//! Database operations for community subscriptions

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::shared::social::{Subscription, SubscriptionStatus, FREE_PLAN};

const SUBSCRIPTION_SELECT: &str = r#"
    SELECT s.id, s.user_id, s.community_id, c.name AS community_name, s.plan, s.status,
           s.started_at, s.expires_at, s.canceled_at
    FROM subscriptions s
    JOIN communities c ON c.id = s.community_id
"#;

/// Start an active free subscription with no expiry
pub async fn insert_subscription<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: Uuid,
    community_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO subscriptions (id, user_id, community_id, plan, status, started_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(community_id)
    .bind(FREE_PLAN)
    .bind(SubscriptionStatus::Active.as_str())
    .bind(Utc::now())
    .execute(executor)
    .await?;
    Ok(id)
}

pub async fn get_subscription<'e>(
    executor: impl SqliteExecutor<'e>,
    id: Uuid,
) -> Result<Option<Subscription>, sqlx::Error> {
    let query = format!("{SUBSCRIPTION_SELECT} WHERE s.id = ?");
    sqlx::query_as::<_, Subscription>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn has_active_subscription<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: Uuid,
    community_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM subscriptions WHERE user_id = ? AND community_id = ? AND status = 'active'",
    )
    .bind(user_id)
    .bind(community_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Subscription>, sqlx::Error> {
    let query = format!("{SUBSCRIPTION_SELECT} WHERE s.user_id = ? ORDER BY s.started_at DESC");
    sqlx::query_as::<_, Subscription>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_for_community(
    pool: &SqlitePool,
    community_id: Uuid,
) -> Result<Vec<Subscription>, sqlx::Error> {
    let query = format!("{SUBSCRIPTION_SELECT} WHERE s.community_id = ? ORDER BY s.started_at DESC");
    sqlx::query_as::<_, Subscription>(&query)
        .bind(community_id)
        .fetch_all(pool)
        .await
}

/// Mark a user's active subscriptions whose expiry has passed as expired
pub async fn expire_overdue(
    pool: &SqlitePool,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions SET status = 'expired'
        WHERE user_id = ? AND status = 'active' AND expires_at IS NOT NULL AND expires_at <= ?
        "#,
    )
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn cancel_subscription<'e>(
    executor: impl SqliteExecutor<'e>,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE subscriptions SET status = 'canceled', canceled_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Cancel whatever active subscription the user holds on a community
pub async fn cancel_active_for<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: Uuid,
    community_id: Uuid,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions SET status = 'canceled', canceled_at = ?
        WHERE user_id = ? AND community_id = ? AND status = 'active'
        "#,
    )
    .bind(now)
    .bind(user_id)
    .bind(community_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
