//! In-memory telemetry state: the current reading, the bounded history ring,
//! and the alert engine, owned by one orchestrating component.
//!
//! A single [`TelemetryState`] is instantiated per process and handed to the
//! route handlers through axum state as a [`SharedState`]; there are no
//! module-level globals.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::alert::{AlertEngine, AlertKind};
use crate::config::Config;
use crate::models::{self, DeviceStatus, HistoryPoint, Reading, UpdatePayload};

// ---

/// Maximum number of history points retained.
const HISTORY_CAPACITY: usize = 100;

/// Shared handle to the process-wide telemetry state.
///
/// Ingestion takes the lock exclusively; status and history reads share it
/// and observe a consistent snapshot. No I/O happens under the lock.
pub type SharedState = Arc<RwLock<TelemetryState>>;

// ---

/// Bounded FIFO ring of recent history points.
#[derive(Debug, Default)]
pub struct HistoryRing {
    points: VecDeque<HistoryPoint>,
}

impl HistoryRing {
    /// Append a point, evicting the oldest once capacity is exceeded.
    pub fn push(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        if self.points.len() > HISTORY_CAPACITY {
            self.points.pop_front();
        }
    }

    /// Chronologically ordered copy of the current contents.
    pub fn snapshot(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---

/// Process-wide telemetry state and ingestion orchestrator.
pub struct TelemetryState {
    // ---
    reading: Reading,
    history: HistoryRing,
    alerts: AlertEngine,
    tz_offset_hours: i64,
}

impl TelemetryState {
    pub fn new(config: &Config) -> Self {
        Self {
            reading: Reading::default(),
            history: HistoryRing::default(),
            alerts: AlertEngine::new(
                config.low_threshold,
                config.high_threshold,
                config.cooldown_ms,
            ),
            tz_offset_hours: config.tz_offset_hours,
        }
    }

    /// Build the shared handle used by `main` and the integration tests.
    pub fn shared(config: &Config) -> SharedState {
        Arc::new(RwLock::new(Self::new(config)))
    }

    /// Apply a validated payload: replace the current reading, append a
    /// history point, and collect the notification messages the caller
    /// should dispatch (lifecycle flags first, then any threshold alert).
    ///
    /// Performs no I/O itself, so the lock held around this call is never
    /// held across a network send.
    pub fn ingest(&mut self, update: &UpdatePayload, now: DateTime<Utc>) -> Vec<String> {
        // ---
        let now_ms = now.timestamp_millis();

        self.reading = Reading {
            distance: update.distance,
            level: update.level,
            rssi: update.rssi,
            time: models::format_time(now, self.tz_offset_hours),
            last_seen_ms: now_ms,
        };

        self.history.push(HistoryPoint {
            label: models::minute_label(now, self.tz_offset_hours),
            value: update.level,
        });

        let mut messages = Vec::new();

        // Lifecycle flags bypass the alert engine entirely.
        match update.status {
            Some(DeviceStatus::Boot) => messages.push("Tank sensor booted".to_string()),
            Some(DeviceStatus::Wake) => {
                messages.push("Tank sensor woke from deep sleep".to_string())
            }
            None => {}
        }

        if let Some(kind) = self.alerts.evaluate(update.level, now_ms) {
            messages.push(alert_message(kind, update.level));
        }

        messages
    }

    /// The most recent accepted reading (the zero reading before first
    /// contact).
    pub fn current(&self) -> Reading {
        self.reading.clone()
    }

    /// Owned snapshot of the history ring, oldest first.
    pub fn history(&self) -> Vec<HistoryPoint> {
        self.history.snapshot()
    }
}

/// Threshold alert text delivered to the messaging channel.
fn alert_message(kind: AlertKind, level: f64) -> String {
    match kind {
        AlertKind::Low => format!("Tank level LOW: {level:.1}%"),
        AlertKind::High => format!("Tank level HIGH: {level:.1}%"),
    }
}
