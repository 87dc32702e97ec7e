//! Database operations for communities and their members

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::backend::users::db::like_pattern;
use crate::shared::social::{Community, UserSummary};

const COMMUNITY_SELECT: &str = r#"
    SELECT c.id, c.name, c.description, c.image_url, c.creator_id,
           (SELECT COUNT(*) FROM community_members m WHERE m.community_id = c.id) AS member_count,
           c.created_at, c.updated_at
    FROM communities c
"#;

/// Insert a community row. The creator is added as a member separately.
pub async fn insert_community<'e>(
    executor: impl SqliteExecutor<'e>,
    creator_id: Uuid,
    name: &str,
    description: &str,
    image_url: Option<&str>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO communities (id, name, description, image_url, creator_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(image_url)
    .bind(creator_id)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(id)
}

pub async fn get_community<'e>(
    executor: impl SqliteExecutor<'e>,
    id: Uuid,
) -> Result<Option<Community>, sqlx::Error> {
    let query = format!("{COMMUNITY_SELECT} WHERE c.id = ?");
    sqlx::query_as::<_, Community>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Case-insensitive lookup by name
pub async fn get_community_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Community>, sqlx::Error> {
    let query = format!("{COMMUNITY_SELECT} WHERE c.name = ?");
    sqlx::query_as::<_, Community>(&query)
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// All communities, newest first, optionally filtered by name/description
pub async fn list_communities(
    pool: &SqlitePool,
    search: Option<&str>,
) -> Result<Vec<Community>, sqlx::Error> {
    let pattern = search.map(like_pattern);
    let query = format!(
        r#"{COMMUNITY_SELECT}
        WHERE ? IS NULL
           OR c.name LIKE ? ESCAPE '\'
           OR c.description LIKE ? ESCAPE '\'
        ORDER BY c.created_at DESC"#
    );

    sqlx::query_as::<_, Community>(&query)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(pool)
        .await
}

/// Communities `user_id` is a member of, most recently joined first
pub async fn list_communities_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<Community>, sqlx::Error> {
    let query = format!(
        r#"{COMMUNITY_SELECT}
        JOIN community_members cm ON cm.community_id = c.id
        WHERE cm.user_id = ?
        ORDER BY cm.joined_at DESC"#
    );

    sqlx::query_as::<_, Community>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn update_community(
    pool: &SqlitePool,
    id: Uuid,
    name: &str,
    description: &str,
    image_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE communities
        SET name = ?, description = ?, image_url = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(image_url)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a community; members, posts and subscriptions cascade
pub async fn delete_community(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM communities WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn is_member<'e>(
    executor: impl SqliteExecutor<'e>,
    community_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM community_members WHERE community_id = ? AND user_id = ?",
    )
    .bind(community_id)
    .bind(user_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn list_member_ids<'e>(
    executor: impl SqliteExecutor<'e>,
    community_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM community_members WHERE community_id = ? ORDER BY joined_at")
        .bind(community_id)
        .fetch_all(executor)
        .await
}

/// Member summaries in join order
pub async fn list_members(
    pool: &SqlitePool,
    community_id: Uuid,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url
        FROM community_members cm
        JOIN users u ON u.id = cm.user_id
        WHERE cm.community_id = ?
        ORDER BY cm.joined_at ASC
        "#,
    )
    .bind(community_id)
    .fetch_all(pool)
    .await
}

pub async fn add_member<'e>(
    executor: impl SqliteExecutor<'e>,
    community_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO community_members (community_id, user_id, joined_at) VALUES (?, ?, ?)")
        .bind(community_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn remove_member<'e>(
    executor: impl SqliteExecutor<'e>,
    community_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM community_members WHERE community_id = ? AND user_id = ?")
        .bind(community_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
