//! Community data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;

/// A named group with a creator and a member list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub creator_id: Uuid,
    /// Number of members, computed at read time
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Community with its member list, returned by `GET /api/communities/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityDetail {
    #[serde(flatten)]
    pub community: Community,
    pub members: Vec<UserSummary>,
    /// Whether the caller is a member
    pub is_member: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCommunityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Result of joining a community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinCommunityResponse {
    pub community: Community,
    /// Number of new ally edges created by the join
    pub allies_created: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunitySearchQuery {
    pub search: Option<String>,
}
