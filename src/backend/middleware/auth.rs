/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. It extracts and verifies
 * the JWT from the Authorization header, checks the user still exists, and
 * stores an `AuthenticatedUser` in the request extensions for handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// 1. Extracts the token from `Authorization: Bearer <token>`
/// 2. Verifies signature and expiry
/// 3. Confirms the user still exists (deleted accounts lose access at once)
/// 4. Attaches `AuthenticatedUser` to the request extensions
///
/// Returns 401 Unauthorized if any step fails.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("No token, authorization denied")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid authorization header")
    })?;

    let claims = verify_token(&app_state.config, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Token is not valid")
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized("Token is not valid")
    })?;

    if get_user_by_id(&app_state.db_pool, user_id).await?.is_none() {
        tracing::warn!("Token for unknown user: {}", user_id);
        return Err(BackendError::unauthorized("User no longer exists"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user set by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}
