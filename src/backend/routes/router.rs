/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (public and protected)
 * 2. Uploaded files under `/uploads`
 * 3. Fallback handler (JSON 404)
 *
 * Tracing and CORS layers wrap everything, including the fallback.
 */

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::backend::uploads::UPLOADS_URL_PREFIX;

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and configuration shared by handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    let router = router.nest_service(
        UPLOADS_URL_PREFIX,
        ServeDir::new(&app_state.config.upload_dir),
    );

    let router = router.fallback(not_found).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    router.with_state(app_state)
}
