//! Data models for the telemetry relay: the normalized reading, history
//! points, inbound payload parsing, and the liveness rule.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;

// ---

/// Sentinel RSSI recorded when the payload omits the field or carries a
/// non-numeric value.
pub const RSSI_SENTINEL: i32 = -100;

/// A device counts as online while its last report is younger than this.
pub const ONLINE_WINDOW_MS: i64 = 120_000;

/// Display format for the human-readable reading timestamp.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minute-resolution label attached to history points.
const LABEL_FORMAT: &str = "%H:%M";

// ---

/// The most recent normalized sensor report.
///
/// Exactly one reading is live at a time; each accepted ingestion replaces it
/// wholesale. The default value (all zero, `last_seen_ms = 0`) stands for
/// "never seen".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    // ---
    pub distance: f64,
    pub level: f64,
    pub rssi: i32,
    /// Human-readable local time of the report, informational only.
    pub time: String,
    pub last_seen_ms: i64,
}

/// One retained (minute label, level) pair in the bounded history ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    // ---
    #[serde(rename = "t")]
    pub label: String,
    #[serde(rename = "v")]
    pub value: f64,
}

/// Lifecycle flag a device may attach to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Boot,
    Wake,
}

impl DeviceStatus {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "boot" => Some(Self::Boot),
            "wake" => Some(Self::Wake),
            _ => None,
        }
    }
}

/// Required ingestion fields absent, or present but not coercible to numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingData;

impl std::fmt::Display for MissingData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Missing data")
    }
}

impl std::error::Error for MissingData {}

/// Validated ingestion payload.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePayload {
    // ---
    pub distance: f64,
    pub level: f64,
    pub rssi: i32,
    pub status: Option<DeviceStatus>,
}

impl UpdatePayload {
    /// Parse a raw JSON body into a validated payload.
    ///
    /// `distance` and `level` must be present and numeric (JSON numbers or
    /// numeric strings); anything else is rejected as [`MissingData`] before
    /// any state is touched. `rssi` degrades to [`RSSI_SENTINEL`] instead of
    /// failing, and unrecognized `status` values are ignored.
    pub fn from_json(body: &Value) -> Result<Self, MissingData> {
        // ---
        let distance = body.get("distance").and_then(coerce_f64).ok_or(MissingData)?;
        let level = body.get("level").and_then(coerce_f64).ok_or(MissingData)?;

        let rssi = body
            .get("rssi")
            .and_then(coerce_f64)
            .map(|v| v as i32)
            .unwrap_or(RSSI_SENTINEL);

        let status = body
            .get("status")
            .and_then(Value::as_str)
            .and_then(DeviceStatus::parse);

        Ok(Self {
            distance,
            level,
            rssi,
            status,
        })
    }
}

/// Coerce a loosely-typed JSON value to a float, accepting numbers and
/// numeric strings.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---

/// Whether a device with the given last-report timestamp counts as online.
///
/// Strict boundary: a gap of exactly [`ONLINE_WINDOW_MS`] is already offline.
/// `last_seen_ms = 0` (never seen) falls out as offline for any realistic
/// `now_ms` without a special case.
pub fn is_online(last_seen_ms: i64, now_ms: i64) -> bool {
    now_ms - last_seen_ms < ONLINE_WINDOW_MS
}

/// Format a report timestamp for display, shifted by the configured offset.
pub fn format_time(now: DateTime<Utc>, tz_offset_hours: i64) -> String {
    (now + Duration::hours(tz_offset_hours))
        .format(TIME_FORMAT)
        .to_string()
}

/// Minute-resolution label for a history point.
pub fn minute_label(now: DateTime<Utc>, tz_offset_hours: i64) -> String {
    (now + Duration::hours(tz_offset_hours))
        .format(LABEL_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_liveness_boundary() {
        // ---
        let now = 10_000_000;

        // One millisecond inside the window: online
        assert!(is_online(now - (ONLINE_WINDOW_MS - 1), now));

        // Exactly at the window: offline
        assert!(!is_online(now - ONLINE_WINDOW_MS, now));

        // Never seen
        assert!(!is_online(0, now));

        // Same instant
        assert!(is_online(now, now));
    }

    #[test]
    fn test_full_payload_parses() {
        // ---
        let body = json!({ "distance": 42.5, "level": 63.0, "rssi": -71, "status": "boot" });
        let payload = UpdatePayload::from_json(&body).unwrap();

        assert_eq!(payload.distance, 42.5);
        assert_eq!(payload.level, 63.0);
        assert_eq!(payload.rssi, -71);
        assert_eq!(payload.status, Some(DeviceStatus::Boot));
    }

    #[test]
    fn test_missing_fields_rejected() {
        // ---
        assert_eq!(
            UpdatePayload::from_json(&json!({ "distance": 12.5 })),
            Err(MissingData)
        );
        assert_eq!(
            UpdatePayload::from_json(&json!({ "level": 50.0 })),
            Err(MissingData)
        );
        assert_eq!(UpdatePayload::from_json(&json!({})), Err(MissingData));
    }

    #[test]
    fn test_non_numeric_required_field_rejected() {
        // ---
        let body = json!({ "distance": 12.5, "level": "not a number" });
        assert_eq!(UpdatePayload::from_json(&body), Err(MissingData));

        let body = json!({ "distance": [1, 2], "level": 50.0 });
        assert_eq!(UpdatePayload::from_json(&body), Err(MissingData));
    }

    #[test]
    fn test_numeric_strings_coerced() {
        // ---
        let body = json!({ "distance": "42.5", "level": " 63 " });
        let payload = UpdatePayload::from_json(&body).unwrap();

        assert_eq!(payload.distance, 42.5);
        assert_eq!(payload.level, 63.0);
    }

    #[test]
    fn test_rssi_falls_back_to_sentinel() {
        // ---
        // Absent
        let payload = UpdatePayload::from_json(&json!({ "distance": 1.0, "level": 2.0 })).unwrap();
        assert_eq!(payload.rssi, RSSI_SENTINEL);

        // Present but junk
        let body = json!({ "distance": 1.0, "level": 2.0, "rssi": "weak" });
        let payload = UpdatePayload::from_json(&body).unwrap();
        assert_eq!(payload.rssi, RSSI_SENTINEL);
    }

    #[test]
    fn test_unknown_status_ignored() {
        // ---
        let body = json!({ "distance": 1.0, "level": 2.0, "status": "rebooting" });
        let payload = UpdatePayload::from_json(&body).unwrap();
        assert_eq!(payload.status, None);

        let body = json!({ "distance": 1.0, "level": 2.0, "status": "wake" });
        let payload = UpdatePayload::from_json(&body).unwrap();
        assert_eq!(payload.status, Some(DeviceStatus::Wake));
    }

    #[test]
    fn test_timezone_offset_applied_to_labels() {
        // ---
        let at = Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 10).unwrap();

        // UTC-5: 18:45 becomes 13:45
        assert_eq!(minute_label(at, -5), "13:45");
        assert_eq!(minute_label(at, 0), "18:45");
        assert_eq!(format_time(at, -5), "2025-03-26 13:45:10");
    }

    #[test]
    fn test_history_point_wire_shape() {
        // ---
        let point = HistoryPoint {
            label: "18:45".to_string(),
            value: 63.0,
        };
        let encoded = serde_json::to_value(&point).unwrap();
        assert_eq!(encoded, json!({ "t": "18:45", "v": 63.0 }));
    }
}
