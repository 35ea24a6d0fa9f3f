//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::report::ReportAggregator;
use crate::source::CatalogSource;

pub use routes::create_router;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub aggregator: ReportAggregator,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, aggregator: ReportAggregator) -> Self {
        Self {
            catalog,
            aggregator,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Note: Axum layers are applied in reverse order (last added = first executed)
    // Order: context -> logging -> handler
    let api_routes = create_router()
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::context_middleware));

    Router::new()
        // Health check (no context, no logging)
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
