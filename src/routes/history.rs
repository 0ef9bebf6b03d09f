use axum::{extract::State, routing::get, Json, Router};

use crate::models::HistoryPoint;
use crate::notify::Notifier;
use crate::state::SharedState;

// ---

pub fn router() -> Router<(SharedState, Notifier)> {
    // ---
    Router::new().route("/api/history", get(handler))
}

/// Handle `GET /api/history`: the full ring snapshot, oldest first.
async fn handler(State((state, _)): State<(SharedState, Notifier)>) -> Json<Vec<HistoryPoint>> {
    // ---
    Json(state.read().await.history())
}
