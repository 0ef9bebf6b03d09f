use axum::Router;

use crate::notify::Notifier;
use crate::state::SharedState;

mod health;
mod history;
mod status;
mod update;

// ---

pub fn router(state: SharedState, notifier: Notifier) -> Router {
    // ---
    Router::new()
        .merge(update::router())
        .merge(status::router())
        .merge(history::router())
        .merge(health::router())
        .with_state((state, notifier))
}
