//! HTTP route handlers.
//!
//! Only `/health` is served. Its headers are set by response layers rather
//! than by the handler so every branch, including the plain-text 500, carries
//! the same `Content-Type`.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE},
    middleware,
    routing::any,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Content type declared on every health response
pub const HEALTH_CONTENT_TYPE: &str = "application/json";

/// Cache-Control for health responses - every poll must reach the dice
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Creates the Axum router with the health route and its headers.
pub fn create_router(state: AppState) -> Router {
    // Health check - any method, JSON content type even on the error body
    let health_routes = Router::new()
        .route("/health", any(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static(HEALTH_CONTENT_TYPE),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(health_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
