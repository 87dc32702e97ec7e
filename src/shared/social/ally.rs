//! Ally graph types
//!
//! An ally edge is undirected. It is stored once per unordered pair with the
//! smaller id in `user_a`, which lets a unique constraint reject duplicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;

/// Canonical (ordered) pair of distinct users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllyPair {
    low: Uuid,
    high: Uuid,
}

impl AllyPair {
    /// Returns `None` when both ids are the same user.
    pub fn new(a: Uuid, b: Uuid) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }
}

/// Edges to create when `new_member` joins a community whose members are
/// `existing_members`. Self-pairs and repeated ids are dropped.
pub fn fan_out_pairs(new_member: Uuid, existing_members: &[Uuid]) -> Vec<AllyPair> {
    let mut pairs: Vec<AllyPair> = existing_members
        .iter()
        .filter_map(|&member| AllyPair::new(new_member, member))
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// One of the caller's allies, as returned by `GET /api/allies`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllyResponse {
    pub user: UserSummary,
    /// Community whose shared membership created the edge, if any
    pub community_id: Option<Uuid>,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAllyRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllyCheckResponse {
    pub is_ally: bool,
}
