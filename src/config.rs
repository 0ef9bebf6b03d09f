//! Configuration loader for the `tankwatch` relay.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). By consolidating configuration logic
//! here, we avoid scattering `env::var` calls throughout the codebase.

use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional typed environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, empty when unset.
macro_rules! env_or_empty {
    ($var_name:expr) => {
        env::var($var_name).unwrap_or_default()
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Telegram bot token; empty disables notifications.
    pub bot_token: String,

    /// Telegram chat the notifications are delivered to.
    pub chat_id: String,

    /// Level below which a low alert fires (percent).
    pub low_threshold: f64,

    /// Level above which a high alert fires (percent).
    pub high_threshold: f64,

    /// Minimum interval between two same-band alerts, in milliseconds.
    pub cooldown_ms: i64,

    /// TCP port the HTTP server binds to.
    pub port: u16,

    /// Hour offset from UTC applied to display timestamps and history
    /// labels.
    pub tz_offset_hours: i64,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` – messaging credentials;
///   leaving either unset disables notifications
/// - `LOW_THRESHOLD` – low alert threshold in percent (default: 20)
/// - `HIGH_THRESHOLD` – high alert threshold in percent (default: 90)
/// - `ALERT_COOLDOWN_MS` – same-band alert cooldown (default: 3600000)
/// - `PORT` – HTTP listen port (default: 3000)
/// - `TZ_OFFSET_HOURS` – display timezone offset from UTC (default: 0)
///
/// Returns an error if any numeric variable is present but unparsable.
pub fn load_from_env() -> Result<Config> {
    // ---
    let bot_token = env_or_empty!("TELEGRAM_BOT_TOKEN");
    let chat_id = env_or_empty!("TELEGRAM_CHAT_ID");
    let low_threshold = parse_env!("LOW_THRESHOLD", f64, 20.0);
    let high_threshold = parse_env!("HIGH_THRESHOLD", f64, 90.0);
    let cooldown_ms = parse_env!("ALERT_COOLDOWN_MS", i64, 3_600_000);
    let port = parse_env!("PORT", u16, 3000);
    let tz_offset_hours = parse_env!("TZ_OFFSET_HOURS", i64, 0);

    Ok(Config {
        bot_token,
        chat_id,
        low_threshold,
        high_threshold,
        cooldown_ms,
        port,
        tz_offset_hours,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the bot token while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_token = if self.bot_token.is_empty() {
            "(unset)".to_string()
        } else {
            let visible = self.bot_token.len().min(4);
            format!("{}****", &self.bot_token[..visible])
        };

        let chat_id = if self.chat_id.is_empty() {
            "(unset)"
        } else {
            self.chat_id.as_str()
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  TELEGRAM_BOT_TOKEN : {}", masked_token);
        tracing::info!("  TELEGRAM_CHAT_ID   : {}", chat_id);
        tracing::info!("  LOW_THRESHOLD      : {}", self.low_threshold);
        tracing::info!("  HIGH_THRESHOLD     : {}", self.high_threshold);
        tracing::info!("  ALERT_COOLDOWN_MS  : {}", self.cooldown_ms);
        tracing::info!("  PORT               : {}", self.port);
        tracing::info!("  TZ_OFFSET_HOURS    : {}", self.tz_offset_hours);
    }
}
