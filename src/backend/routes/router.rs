/**
 * Router Configuration
 *
 * Combines public and protected routes, adds a JSON 404 fallback and wraps
 * everything in request tracing and permissive CORS.
 */

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_public_routes(router);
    let router = configure_protected_routes(router, app_state.clone());

    router
        .fallback(|| async { BackendError::not_found("Route not found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
