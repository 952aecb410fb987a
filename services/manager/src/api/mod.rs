//! HTTP API surface of the manager.

pub mod error;
mod resource_provider;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::manager::ResourceProviderManager;

pub use error::ApiError;

/// Create the API router.
///
/// A single POST endpoint carries the whole provider protocol; other
/// methods are answered with 405 and an `Allow: POST` header by the
/// method router.
pub fn create_router(manager: ResourceProviderManager) -> Router {
    Router::new()
        .route("/api/v1/resource_provider", post(resource_provider::api))
        .layer(TraceLayer::new_for_http())
        .with_state(manager)
}
