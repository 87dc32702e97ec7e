//! Database operations for user profiles and search

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::social::UserSummary;

/// Maximum number of users returned by a search
pub const SEARCH_LIMIT: i64 = 50;

/// Build a `LIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// escaped. Use with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Search users by username or full name (case-insensitive)
pub async fn search_users(
    pool: &SqlitePool,
    search: Option<&str>,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    let pattern = search.map(like_pattern);

    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, username, full_name, avatar_url
        FROM users
        WHERE ? IS NULL
           OR username LIKE ? ESCAPE '\'
           OR full_name LIKE ? ESCAPE '\'
        ORDER BY username COLLATE NOCASE ASC
        LIMIT ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(pool)
    .await
}

/// Relationship counts shown on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct ProfileCounts {
    pub ally_count: i64,
    pub community_count: i64,
    pub post_count: i64,
}

pub async fn profile_counts(pool: &SqlitePool, user_id: Uuid) -> Result<ProfileCounts, sqlx::Error> {
    sqlx::query_as::<_, ProfileCounts>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM allies WHERE user_a = ? OR user_b = ?) AS ally_count,
            (SELECT COUNT(*) FROM community_members WHERE user_id = ?) AS community_count,
            (SELECT COUNT(*) FROM posts WHERE author_id = ? AND post_type = 'general') AS post_count
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}
