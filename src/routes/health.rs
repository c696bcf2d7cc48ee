//! The fault-injecting health endpoint.
//!
//! Each request rolls the shared dice and answers with one of four canned
//! responses: a plain-text 500, a healthy payload after a delay, a payload
//! with `postgres` down, or a healthy payload. The `Content-Type` header is
//! applied by the route layer, so the 500 body is labelled JSON too.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::fault::Outcome;
use crate::state::AppState;

/// Body for the healthy outcomes.
pub const HEALTHY_BODY: &str = r#"{"status": "ok", "code": 200, "checks": {"postgres": "up"}}"#;

/// Body when the fabricated dependency is down.
pub const DEGRADED_BODY: &str = r#"{"status": "ok", "code": 200, "checks": {"postgres": "down"}}"#;

/// Body for the injected server error, newline-terminated. Not JSON.
pub const ERROR_BODY: &str = "Internal Server Error\n";

/// Health check handler.
///
/// Accepts any method. The request body and query string are ignored.
pub async fn health(State(state): State<AppState>) -> Response {
    let roll = state.dice.roll();
    let outcome = Outcome::from_roll(roll);
    tracing::debug!(roll, outcome = outcome.as_str(), "Rolled health outcome");

    match outcome {
        Outcome::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY).into_response(),
        Outcome::SlowHealthy => {
            let latency = state.latency();
            tracing::info!("Sleeping for {} seconds", latency.as_secs());
            tokio::time::sleep(latency).await;
            (StatusCode::OK, HEALTHY_BODY).into_response()
        }
        Outcome::Degraded => (StatusCode::OK, DEGRADED_BODY).into_response(),
        Outcome::Healthy => (StatusCode::OK, HEALTHY_BODY).into_response(),
    }
}
