//! Database operations for posts
//!
//! Rows come back without likes; `load_post_likes` fills them in.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::likes::{list_likes, LikeTarget};
use crate::shared::social::{Post, PostType};

const POST_SELECT: &str = r#"
    SELECT p.id, p.author_id, u.username AS author_username, p.content, p.image_url,
           p.post_type, p.community_id,
           (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count,
           p.created_at, p.updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

/// Fields of a post about to be inserted
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub author_id: Uuid,
    pub content: &'a str,
    pub image_url: Option<&'a str>,
    pub post_type: PostType,
    pub community_id: Option<Uuid>,
}

pub async fn create_post(pool: &SqlitePool, new_post: NewPost<'_>) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, author_id, content, image_url, post_type, community_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(new_post.author_id)
    .bind(new_post.content)
    .bind(new_post.image_url)
    .bind(new_post.post_type.as_str())
    .bind(new_post.community_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_post(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn get_post(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let query = format!("{POST_SELECT} WHERE p.id = ?");
    sqlx::query_as::<_, Post>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// General posts written by `author_id`, newest first
pub async fn list_general_posts_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        r#"{POST_SELECT}
        WHERE p.author_id = ? AND p.post_type = 'general'
        ORDER BY p.created_at DESC"#
    );
    sqlx::query_as::<_, Post>(&query)
        .bind(author_id)
        .fetch_all(pool)
        .await
}

/// Posts published in a community, newest first
pub async fn list_community_posts(
    pool: &SqlitePool,
    community_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        r#"{POST_SELECT}
        WHERE p.community_id = ? AND p.post_type = 'community'
        ORDER BY p.created_at DESC"#
    );
    sqlx::query_as::<_, Post>(&query)
        .bind(community_id)
        .fetch_all(pool)
        .await
}

/// General posts by the viewer and by the viewer's allies
pub async fn list_ally_general_posts(
    pool: &SqlitePool,
    viewer_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        r#"{POST_SELECT}
        WHERE p.post_type = 'general'
          AND (p.author_id = ?
               OR p.author_id IN (SELECT user_b FROM allies WHERE user_a = ?
                                  UNION
                                  SELECT user_a FROM allies WHERE user_b = ?))
        ORDER BY p.created_at DESC"#
    );
    sqlx::query_as::<_, Post>(&query)
        .bind(viewer_id)
        .bind(viewer_id)
        .bind(viewer_id)
        .fetch_all(pool)
        .await
}

/// Community posts from every community the viewer belongs to
pub async fn list_joined_community_posts(
    pool: &SqlitePool,
    viewer_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        r#"{POST_SELECT}
        WHERE p.post_type = 'community'
          AND p.community_id IN (SELECT community_id FROM community_members WHERE user_id = ?)
        ORDER BY p.created_at DESC"#
    );
    sqlx::query_as::<_, Post>(&query)
        .bind(viewer_id)
        .fetch_all(pool)
        .await
}

pub async fn update_post(
    pool: &SqlitePool,
    id: Uuid,
    content: &str,
    image_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE posts SET content = ?, image_url = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(image_url)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a post; its comments and likes cascade
pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Fill in the like set of every post
pub async fn load_post_likes(pool: &SqlitePool, mut posts: Vec<Post>) -> Result<Vec<Post>, sqlx::Error> {
    for post in &mut posts {
        post.likes = list_likes(pool, LikeTarget::Post, post.id).await?;
    }
    Ok(posts)
}
