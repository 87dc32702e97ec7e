//! Routes Module
//!
//! - **`router`** - Builds the complete application router
//! - **`api_routes`** - Maps `/api` endpoints to handlers

pub mod api_routes;
pub mod router;

pub use router::create_router;
