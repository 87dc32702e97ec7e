//! Backend Error Module
//!
//! Error types returned by HTTP handlers and server startup.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError, StartupError
//! └── conversion.rs - IntoResponse for BackendError
//! ```
//!
//! Every handler returns `Result<_, BackendError>`; the error becomes a JSON
//! body `{"error": ..., "status": ...}` with the matching status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{is_unique_violation, BackendError, StartupError};
