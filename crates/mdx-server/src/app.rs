//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/config", get(handlers::config::get_config))
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/docs/", get(handlers::docs::get_root_document))
        .route("/api/docs/{*slug}", get(handlers::docs::get_document))
        .route(
            "/api/playground/resolve",
            post(handlers::playground::resolve_playground),
        );

    Router::new()
        .merge(api_routes)
        // Everything else is a page URL resolved against the route prefix
        .fallback(get(handlers::docs::get_routed_page))
        .layer(
            ServiceBuilder::new()
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
