//! Subscriptions Module
//!
//! Free-plan community subscriptions under `/api/subscriptions`.
//!
//! A subscription is `active` until it is canceled or its `expires_at`
//! passes. Free subscriptions never expire; expiry is still honoured for
//! rows that carry one.

pub mod db;
pub mod handlers;

pub use handlers::{
    cancel_subscription, create_subscription, get_community_subscriptions, get_my_subscriptions,
};
