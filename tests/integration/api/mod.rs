//! API integration tests
//!
//! Integration tests for all API endpoints

mod allies_test;
mod auth_test;
mod communities_test;
mod posts_test;
