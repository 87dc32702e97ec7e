//! Database operations for comments

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::likes::{list_likes, LikeTarget};
use crate::shared::social::Comment;

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.post_id, c.author_id, u.username AS author_username, c.content,
           c.parent_comment_id, c.created_at, c.updated_at
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
    parent_comment_id: Option<Uuid>,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, author_id, content, parent_comment_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .bind(parent_comment_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_comment(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn get_comment(pool: &SqlitePool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    let query = format!("{COMMENT_SELECT} WHERE c.id = ?");
    sqlx::query_as::<_, Comment>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Every comment on a post, oldest first, with likes loaded
pub async fn list_comments_for_post(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let query = format!("{COMMENT_SELECT} WHERE c.post_id = ? ORDER BY c.created_at ASC, c.id ASC");
    let mut comments = sqlx::query_as::<_, Comment>(&query)
        .bind(post_id)
        .fetch_all(pool)
        .await?;

    for comment in &mut comments {
        comment.likes = list_likes(pool, LikeTarget::Comment, comment.id).await?;
    }
    Ok(comments)
}

pub async fn update_comment(pool: &SqlitePool, id: Uuid, content: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a comment; replies and likes cascade
pub async fn delete_comment(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
