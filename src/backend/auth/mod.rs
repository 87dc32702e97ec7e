//! Authentication Module
//!
//! User registration, login and session tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User record and queries
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - Account registration
//!     ├── login.rs    - Credential check
//!     └── me.rs       - Current account
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user created → JWT returned
//! 2. **Login**: email, password → bcrypt verify → JWT returned
//! 3. **Authenticated requests**: `Authorization: Bearer <JWT>` → verified by
//!    `middleware::auth_middleware`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost from `BCRYPT_COST`)
//! - Tokens expire after 7 days unless `TOKEN_TTL_DAYS` says otherwise
//! - Invalid credentials return 401 without saying which part was wrong

pub mod users;
pub mod sessions;
pub mod handlers;

pub use handlers::{get_me, login, register};
