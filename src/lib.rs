//! Allynet - Main Library
//!
//! Allynet is the backend of a community-centred social network. Users join
//! communities, and every member of a community automatically becomes an
//! "ally" of every other member. Allies see each other's general posts in
//! their feed; community posts stay inside the community.
//!
//! # Module Structure
//!
//! - **`shared`** - Types and rules that do not touch HTTP or the database
//!   - Request/response structures
//!   - Input validation
//!   - Feed assembly, comment threading, ally pairing
//!   - Error types
//!
//! - **`backend`** - The Axum server
//!   - Route configuration and JWT middleware
//!   - Handlers per resource
//!   - SQLite persistence through sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use allynet::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation failures
//! - `backend::error::BackendError` for everything a handler can return
//! - `backend::error::StartupError` for configuration and database setup

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
