//! Threshold alert decisions with hysteresis and cooldown.
//!
//! The level oscillates while the tank fills or drains, so raw threshold
//! checks would flood the messaging channel. The engine suppresses repeat
//! alerts of the same band until the cooldown elapses, fires immediately when
//! the band changes, and re-arms as soon as the level returns to the normal
//! zone.
//!
//! State is held in-memory for the process lifetime only. A restart re-arms
//! everything, which is the conservative direction.

// ---

/// The kind of alert an evaluation can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Low,
    High,
}

/// Stateful alert decision engine.
///
/// Tracks the band of the last emitted alert plus a cooldown clock. The
/// normal band between the thresholds is encoded as `None`.
#[derive(Debug)]
pub struct AlertEngine {
    // ---
    low_threshold: f64,
    high_threshold: f64,
    cooldown_ms: i64,
    last_kind: Option<AlertKind>,
    last_alert_ms: i64,
}

impl AlertEngine {
    pub fn new(low_threshold: f64, high_threshold: f64, cooldown_ms: i64) -> Self {
        Self {
            low_threshold,
            high_threshold,
            cooldown_ms,
            last_kind: None,
            last_alert_ms: 0,
        }
    }

    /// Classify a level against the thresholds.
    ///
    /// Boundaries are exclusive: a level exactly at either threshold is
    /// normal, which defines the dead zone between the bands.
    fn classify(&self, level: f64) -> Option<AlertKind> {
        if level < self.low_threshold {
            Some(AlertKind::Low)
        } else if level > self.high_threshold {
            Some(AlertKind::High)
        } else {
            None
        }
    }

    /// Decide whether an alert should be emitted for `level` at `now_ms`.
    ///
    /// Returns the band to alert on, or `None` to stay quiet. A normal
    /// reading clears the hysteresis so the next threshold crossing fires
    /// immediately. A crossing into the opposite band fires regardless of
    /// the cooldown, since that is operationally significant on its own.
    pub fn evaluate(&mut self, level: f64, now_ms: i64) -> Option<AlertKind> {
        // ---
        match self.classify(level) {
            None => {
                self.last_kind = None;
                None
            }
            Some(band) => {
                if self.last_kind != Some(band) || now_ms - self.last_alert_ms > self.cooldown_ms {
                    self.last_kind = Some(band);
                    self.last_alert_ms = now_ms;
                    Some(band)
                } else {
                    None
                }
            }
        }
    }
}
