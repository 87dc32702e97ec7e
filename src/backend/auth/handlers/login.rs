/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown email and wrong password return the same 401 response
 * - Passwords are never logged or returned
 */

use axum::extract::State;
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown email or incorrect password
/// * `500 Internal Server Error` - Database, hashing or token failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let email = request.email.trim().to_lowercase();
    tracing::info!("Login request for: {}", email);

    let user = get_user_by_email(&state.db_pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let password_hash = user.password_hash.clone();
    let matches =
        tokio::task::spawn_blocking(move || verify(request.password, &password_hash)).await??;
    if !matches {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(&state.config, user.id, &user.email)?;
    tracing::info!("User logged in: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.to_response(),
    }))
}
