//! Community subscription records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Plan assigned to every subscription; payments are not wired up
pub const FREE_PLAN: &str = "free";

/// Lifecycle of a subscription
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Canceled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl TryFrom<String> for SubscriptionStatus {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(SubscriptionStatus::Active),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            "expired" => Ok(SubscriptionStatus::Expired),
            _ => Err(SharedError::invalid_value("subscription status", value)),
        }
    }
}

/// A user's membership subscription to a community
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Uuid,
    pub community_name: String,
    pub plan: String,
    #[sqlx(try_from = "String")]
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Status as of `now`: an active subscription past its expiry reads as
    /// expired even before the stored row is updated.
    pub fn status_at(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        match (self.status, self.expires_at) {
            (SubscriptionStatus::Active, Some(expires_at)) if expires_at <= now => {
                SubscriptionStatus::Expired
            }
            (status, _) => status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub community_id: Uuid,
}
