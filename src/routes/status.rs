// src/routes/status.rs
//! Current-reading endpoint polled by the dashboard.
//!
//! Combines the latest stored reading with the liveness rule evaluated at
//! request time; the device itself never calls this route.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::models::{self, Reading};
use crate::notify::Notifier;
use crate::state::SharedState;

/// JSON response body for the `/api/status` endpoint.
#[derive(Serialize)]
struct StatusResponse {
    // ---
    distance: f64,
    level: f64,
    rssi: i32,
    time: String,
    #[serde(rename = "lastSeen")]
    last_seen: i64,
    online: bool,
}

impl StatusResponse {
    fn new(reading: Reading, now_ms: i64) -> Self {
        Self {
            online: models::is_online(reading.last_seen_ms, now_ms),
            distance: reading.distance,
            level: reading.level,
            rssi: reading.rssi,
            time: reading.time,
            last_seen: reading.last_seen_ms,
        }
    }
}

/// Handle `GET /api/status`.
async fn handler(State((state, _)): State<(SharedState, Notifier)>) -> Json<StatusResponse> {
    // ---
    let reading = state.read().await.current();
    Json(StatusResponse::new(reading, Utc::now().timestamp_millis()))
}

pub fn router() -> Router<(SharedState, Notifier)> {
    Router::new().route("/api/status", get(handler))
}
