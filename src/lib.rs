//! # tankwatch
//!
//! Backend relay for a single tank level sensor: ingests readings over HTTP,
//! keeps the latest reading plus a bounded recent history in memory, derives
//! an online/offline signal from update recency, and pushes threshold alerts
//! to Telegram with cooldown/hysteresis so the channel is not flooded while
//! the level oscillates around a threshold.
//!
//! State is memory-resident and ephemeral by design; a restart re-arms the
//! alert logic and forgets history, which is the conservative direction for
//! an alerting relay.
//!
//! The crate is organized into:
//! - [`config`]: environment-driven configuration
//! - [`models`]: readings, history points, payload parsing, liveness rule
//! - [`alert`]: threshold band classification and alert decisions
//! - [`state`]: in-memory telemetry state and ingestion orchestration
//! - [`notify`]: fire-and-forget Telegram dispatch
//! - [`routes`]: axum route gateway

pub mod alert;
pub mod config;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;

// Re-export main types for convenience
pub use config::Config;
pub use models::{HistoryPoint, Reading, UpdatePayload};
pub use notify::Notifier;
pub use state::{SharedState, TelemetryState};
