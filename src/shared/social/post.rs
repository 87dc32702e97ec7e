//! Post data structures and feed assembly

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Where a post is published
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// Visible on the author's profile and to their allies
    #[default]
    General,
    /// Visible to members of the post's community
    Community,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::General => "general",
            PostType::Community => "community",
        }
    }
}

impl TryFrom<String> for PostType {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "general" => Ok(PostType::General),
            "community" => Ok(PostType::Community),
            _ => Err(SharedError::invalid_value("post type", value)),
        }
    }
}

/// A post with its author name and like set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub content: String,
    pub image_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub post_type: PostType,
    pub community_id: Option<Uuid>,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ids of users who liked the post, filled after the row is loaded
    #[sqlx(skip)]
    #[serde(default)]
    pub likes: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub post_type: PostType,
    #[serde(default)]
    pub community_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

/// Like state returned after a like/unlike on a post or comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikesResponse {
    pub likes: Vec<Uuid>,
    pub like_count: usize,
}

impl From<Vec<Uuid>> for LikesResponse {
    fn from(likes: Vec<Uuid>) -> Self {
        let like_count = likes.len();
        Self { likes, like_count }
    }
}

/// Merge general posts from allies with community posts from joined
/// communities into one feed, newest first.
///
/// A post present in both inputs appears once. Ties on `created_at` are broken
/// by id so the order is stable across requests.
pub fn assemble_feed(general: Vec<Post>, community: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut feed: Vec<Post> = general
        .into_iter()
        .chain(community)
        .filter(|post| seen.insert(post.id))
        .collect();

    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    feed
}
