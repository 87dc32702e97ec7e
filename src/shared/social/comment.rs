//! Comment data structures and reply threading

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment on a post, optionally replying to another comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub content: String,
    pub parent_comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub likes: Vec<Uuid>,
}

/// A comment together with its replies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_comment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// Arrange a post's comments into reply trees.
///
/// Input order is preserved among siblings, so passing comments sorted by
/// `created_at` yields oldest-first threads. A reply whose parent is not in
/// `comments` is promoted to a root.
pub fn build_thread(comments: Vec<Comment>) -> Vec<CommentNode> {
    let present: HashSet<Uuid> = comments.iter().map(|c| c.id).collect();

    let mut roots = Vec::new();
    let mut children: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for comment in comments {
        match comment.parent_comment_id {
            Some(parent) if parent != comment.id && present.contains(&parent) => {
                children.entry(parent).or_default().push(comment);
            }
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|root| attach_replies(root, &mut children))
        .collect()
}

fn attach_replies(comment: Comment, children: &mut HashMap<Uuid, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| attach_replies(reply, children))
        .collect();
    CommentNode { comment, replies }
}
