use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::models::UpdatePayload;
use crate::notify::Notifier;
use crate::state::SharedState;

// ---

pub fn router() -> Router<(SharedState, Notifier)> {
    // ---
    Router::new().route("/api/update", post(handler))
}

async fn handler(
    State((state, notifier)): State<(SharedState, Notifier)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    // ---
    let payload = match UpdatePayload::from_json(&body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!("POST /api/update rejected: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing data" })),
            )
                .into_response();
        }
    };

    info!(
        "POST /api/update - distance {:.1}, level {:.1}, rssi {}",
        payload.distance, payload.level, payload.rssi
    );

    // Mutate under the write lock, then dispatch with the lock released so
    // channel latency never delays the device response.
    let messages = {
        let mut telemetry = state.write().await;
        telemetry.ingest(&payload, Utc::now())
    };

    for message in messages {
        notifier.send_detached(message);
    }

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
