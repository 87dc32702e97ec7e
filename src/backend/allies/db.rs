//! Database operations for the ally graph
//!
//! Edges are stored once per unordered pair (`user_a < user_b`), so every
//! write goes through `AllyPair`.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::shared::social::{AllyPair, AllyResponse, UserSummary};

/// Insert an edge unless it already exists. Returns whether a row was added.
pub async fn insert_pair<'e>(
    executor: impl SqliteExecutor<'e>,
    pair: AllyPair,
    community_id: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO allies (id, user_a, user_b, community_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(pair.low())
    .bind(pair.high())
    .bind(community_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn pair_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    pair: AllyPair,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM allies WHERE user_a = ? AND user_b = ?")
        .bind(pair.low())
        .bind(pair.high())
        .fetch_one(executor)
        .await?;
    Ok(count > 0)
}

pub async fn delete_pair(pool: &SqlitePool, pair: AllyPair) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM allies WHERE user_a = ? AND user_b = ?")
        .bind(pair.low())
        .bind(pair.high())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[derive(Debug, sqlx::FromRow)]
struct AllyRow {
    id: Uuid,
    username: String,
    full_name: Option<String>,
    avatar_url: Option<String>,
    community_id: Option<Uuid>,
    since: DateTime<Utc>,
}

impl From<AllyRow> for AllyResponse {
    fn from(row: AllyRow) -> Self {
        AllyResponse {
            user: UserSummary {
                id: row.id,
                username: row.username,
                full_name: row.full_name,
                avatar_url: row.avatar_url,
            },
            community_id: row.community_id,
            since: row.since,
        }
    }
}

/// All allies of `user_id`, most recent edge first
pub async fn list_allies(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<AllyResponse>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AllyRow>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url, a.community_id, a.created_at AS since
        FROM allies a
        JOIN users u ON u.id = CASE WHEN a.user_a = ? THEN a.user_b ELSE a.user_a END
        WHERE a.user_a = ? OR a.user_b = ?
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(AllyResponse::from).collect())
}
