/**
 * API Route Handlers
 *
 * This module wires every `/api` endpoint to its handler.
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/health` - Liveness check
 * - `POST /api/auth/register` - Create an account
 * - `POST /api/auth/login` - Exchange credentials for a token
 *
 * ## Protected (Bearer token)
 * - `/api/auth/me`
 * - `/api/users/...`
 * - `/api/communities/...`
 * - `/api/posts/...`
 * - `/api/comments/...`
 * - `/api/subscriptions/...`
 * - `/api/allies/...`
 * - `/api/uploads`
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::backend::allies::{check_ally, create_ally, list_my_allies, list_user_allies, remove_ally};
use crate::backend::auth::{get_me, login, register};
use crate::backend::comments::{
    create_comment, delete_comment, get_post_comments, like_comment, unlike_comment,
    update_comment,
};
use crate::backend::communities::{
    create_community, delete_community, get_community, get_community_posts, join_community,
    leave_community, list_communities, list_members, update_community,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::posts::{
    create_post, delete_post, get_feed, get_post, like_post, unlike_post, update_post,
};
use crate::backend::server::state::AppState;
use crate::backend::subscriptions::{
    cancel_subscription, create_subscription, get_community_subscriptions, get_my_subscriptions,
};
use crate::backend::uploads::upload_file;
use crate::backend::users::{
    delete_me, get_user_communities, get_user_posts, get_user_profile, list_users, update_me,
};

/// Multipart framing on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Configure API routes
///
/// Adds the public routes as they are, and every other route behind
/// `auth_middleware`. Requests without a valid token never reach a
/// protected handler.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let upload_limit = app_state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let protected = Router::new()
        // Auth
        .route("/api/auth/me", get(get_me))
        // Users
        .route("/api/users", get(list_users))
        .route("/api/users/me", put(update_me).delete(delete_me))
        .route("/api/users/{id}", get(get_user_profile))
        .route("/api/users/{id}/communities", get(get_user_communities))
        .route("/api/users/{id}/posts", get(get_user_posts))
        // Communities
        .route("/api/communities", get(list_communities).post(create_community))
        .route(
            "/api/communities/{id}",
            get(get_community).put(update_community).delete(delete_community),
        )
        .route("/api/communities/{id}/join", post(join_community))
        .route("/api/communities/{id}/leave", post(leave_community))
        .route("/api/communities/{id}/members", get(list_members))
        .route("/api/communities/{id}/posts", get(get_community_posts))
        // Posts
        .route("/api/posts", post(create_post))
        .route("/api/posts/feed", get(get_feed))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/posts/{id}/like", post(like_post))
        .route("/api/posts/{id}/unlike", post(unlike_post))
        // Comments
        .route("/api/comments", post(create_comment))
        .route("/api/comments/post/{post_id}", get(get_post_comments))
        .route("/api/comments/{id}", put(update_comment).delete(delete_comment))
        .route("/api/comments/{id}/like", post(like_comment))
        .route("/api/comments/{id}/unlike", post(unlike_comment))
        // Subscriptions
        .route("/api/subscriptions", post(create_subscription))
        .route("/api/subscriptions/me", get(get_my_subscriptions))
        .route(
            "/api/subscriptions/community/{community_id}",
            get(get_community_subscriptions),
        )
        .route("/api/subscriptions/{id}/cancel", post(cancel_subscription))
        // Allies
        .route("/api/allies", get(list_my_allies).post(create_ally))
        .route("/api/allies/user/{id}", get(list_user_allies))
        .route("/api/allies/check/{user_id}", get(check_ally))
        .route("/api/allies/{user_id}", delete(remove_ally))
        // Uploads
        .route(
            "/api/uploads",
            post(upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(public).merge(protected)
}
