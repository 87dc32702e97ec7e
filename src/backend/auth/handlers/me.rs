/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the account behind the bearer token. The auth
 * middleware has already verified the token and that the user exists.
 */

use axum::extract::State;
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::AuthUser;
use crate::shared::social::UserResponse;

pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.to_response()))
}
