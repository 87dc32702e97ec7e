//! Middleware Module
//!
//! HTTP middleware applied before handlers run.
//!
//! - **`auth`** - JWT authentication for protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! use allynet::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/api/auth/me", get(get_me))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
