//! Backend Module
//!
//! All server-side code for Allynet: an Axum HTTP API over SQLite for
//! users, communities, posts, comments, subscriptions and the ally graph.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly and route tables
//! - **`middleware`** - JWT authentication
//! - **`auth`** - Registration, login, tokens, user records
//! - **`users`** - Profiles and search
//! - **`communities`** - Communities, membership, ally fan-out on join
//! - **`posts`** - Posts, likes, feed
//! - **`comments`** - Threaded comments and likes
//! - **`subscriptions`** - Community subscriptions
//! - **`allies`** - The ally graph
//! - **`uploads`** - Image uploads to local disk
//! - **`error`** - Backend error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── auth/           - Authentication
//! ├── users/          - User profiles
//! ├── communities/    - Communities and membership
//! ├── posts/          - Posts and feed
//! ├── comments/       - Comments
//! ├── subscriptions/  - Subscriptions
//! ├── allies/         - Ally graph
//! ├── uploads/        - File uploads
//! ├── likes.rs        - Like sets shared by posts and comments
//! ├── extract.rs      - Json/Path/Query with JSON rejections
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `SqlitePool` and an `Arc<ServerConfig>`. Handlers
//! extract only what they need through `FromRef`. There is no in-memory
//! state beyond that; every request reads and writes the database.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Client errors carry their own
//! status; database, hashing, token and IO failures become 500 and are
//! logged.
//!
//! # Example
//!
//! ```rust,no_run
//! use allynet::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// User profiles and search
pub mod users;

/// Communities and membership
pub mod communities;

/// Posts, likes and feed
pub mod posts;

/// Threaded comments
pub mod comments;

/// Community subscriptions
pub mod subscriptions;

/// Ally graph
pub mod allies;

/// Image uploads
pub mod uploads;

/// Like sets for posts and comments
pub mod likes;

/// Extractors with JSON rejections
pub mod extract;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
