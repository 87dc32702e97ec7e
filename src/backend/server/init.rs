/**
 * Server Initialization
 *
 * Builds the Axum application from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Make sure the upload directory exists
 * 3. Create the shared `AppState`
 * 4. Create the router with all routes and middleware
 */

use axum::Router;

use crate::backend::error::StartupError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated, or the upload
/// directory cannot be created. Unlike optional services, both are required
/// for every API route.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing Allynet backend server");

    let db_pool = load_database(&config.database_url).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!("Serving uploads from {}", config.upload_dir.display());

    let app_state = AppState::new(db_pool, config);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
