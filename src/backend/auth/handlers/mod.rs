//! Authentication HTTP Handlers
//!
//! - `register` - POST /api/auth/register
//! - `login` - POST /api/auth/login
//! - `get_me` - GET /api/auth/me

pub mod types;
pub mod register;
pub mod login;
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;
pub use types::{AuthResponse, LoginRequest, RegisterRequest};
