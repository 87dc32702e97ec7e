/**
 * Register Handler
 *
 * This module implements the account registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email, password and full name
 * 2. Reject an email or username that is already taken (400)
 * 3. Hash the password using bcrypt
 * 4. Create the user
 * 5. Return a JWT token and the account
 */

use axum::{extract::State, http::StatusCode};
use bcrypt::hash;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username, NewUser};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::extract::Json;
use crate::backend::server::state::AppState;
use crate::shared::validation;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid fields, or email/username already registered
/// * `500 Internal Server Error` - Hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "correct horse"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let username = validation::username(&request.username)?;
    let email = validation::email(&request.email)?;
    validation::password(&request.password)?;
    let full_name = validation::optional_text(
        "full_name",
        request.full_name.as_deref(),
        validation::FULL_NAME_MAX,
    )?;
    tracing::info!("Register request for username: {}, email: {}", username, email);

    let pool = &state.db_pool;
    if get_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::bad_request("User with this email already exists"));
    }
    if get_user_by_username(pool, &username).await?.is_some() {
        tracing::warn!("Username already taken: {}", username);
        return Err(BackendError::bad_request("Username is already taken"));
    }

    let cost = state.config.bcrypt_cost;
    let password_hash = tokio::task::spawn_blocking(move || hash(request.password, cost)).await??;

    let user = create_user(
        pool,
        NewUser {
            username,
            email,
            password_hash,
            full_name,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::bad_request("User with this email or username already exists")
        } else {
            e.into()
        }
    })?;

    let token = create_token(&state.config, user.id, &user.email)?;
    tracing::info!("User registered: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.to_response(),
        }),
    ))
}
