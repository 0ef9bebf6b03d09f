// src/routes/health.rs
//! API health check endpoint for the tankwatch relay.
//!
//! Defines the `/health` route used by container orchestrators and CI
//! pipelines to verify the service is running and able to respond. It is a
//! sibling module in the `routes` directory: the handler stays internal,
//! and the gateway (`mod.rs`) merges the exported subrouter so `main.rs`
//! never learns about individual endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Deliberately lightweight: does not touch the telemetry state or the
/// messaging channel.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the
/// gateway router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
