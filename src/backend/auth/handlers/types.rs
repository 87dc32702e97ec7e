/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login and me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::social::UserResponse;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// 3-30 chars, starts with a letter, letters/digits/underscore
    pub username: String,
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by register and login: a session token plus the account
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT for the `Authorization: Bearer` header
    pub token: String,
    pub user: UserResponse,
}
