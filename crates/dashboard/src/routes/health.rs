//! Liveness and readiness probes.

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

const PROBE_KEY: &str = "health_probe";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Writes, reads back and removes a probe key. Returns 503 Service
/// Unavailable if any step fails.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let storage = state.storage();
    let round_trip = storage
        .set(PROBE_KEY, "ok")
        .and_then(|()| storage.get(PROBE_KEY))
        .and_then(|value| storage.remove(PROBE_KEY).map(|()| value));

    match round_trip {
        Ok(Some(value)) if value == "ok" => StatusCode::OK,
        Ok(_) => StatusCode::SERVICE_UNAVAILABLE,
        Err(e) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
