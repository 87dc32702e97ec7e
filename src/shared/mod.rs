//! Shared Module
//!
//! Types and pure logic that do not depend on the HTTP server: API request
//! and response shapes, field validation, and the domain helpers (feed
//! assembly, comment threading, ally pairing) the handlers build on.

/// Shared error types
pub mod error;

/// Field validation rules
pub mod validation;

/// Users, communities, posts, comments, subscriptions and allies
pub mod social;

pub use error::SharedError;
