//! Like sets for posts and comments
//!
//! Both like tables have the same shape (`<target>_id`, `user_id`,
//! `created_at`) with a primary key on the pair, so one set of queries
//! serves both.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Post,
    Comment,
}

impl LikeTarget {
    fn table(self) -> &'static str {
        match self {
            LikeTarget::Post => "post_likes",
            LikeTarget::Comment => "comment_likes",
        }
    }

    fn column(self) -> &'static str {
        match self {
            LikeTarget::Post => "post_id",
            LikeTarget::Comment => "comment_id",
        }
    }
}

/// Record a like. Returns false if the user already liked the target.
pub async fn add_like(
    pool: &SqlitePool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "INSERT OR IGNORE INTO {} ({}, user_id, created_at) VALUES (?, ?, ?)",
        target.table(),
        target.column()
    );
    let result = sqlx::query(&query)
        .bind(target_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Remove a like. Returns false if there was nothing to remove.
pub async fn remove_like(
    pool: &SqlitePool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "DELETE FROM {} WHERE {} = ? AND user_id = ?",
        target.table(),
        target.column()
    );
    let result = sqlx::query(&query)
        .bind(target_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// User ids that liked the target, oldest like first
pub async fn list_likes(
    pool: &SqlitePool,
    target: LikeTarget,
    target_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let query = format!(
        "SELECT user_id FROM {} WHERE {} = ? ORDER BY created_at ASC, user_id ASC",
        target.table(),
        target.column()
    );
    sqlx::query_scalar(&query)
        .bind(target_id)
        .fetch_all(pool)
        .await
}
