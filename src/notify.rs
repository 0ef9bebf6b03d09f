//! Fire-and-forget Telegram dispatch.
//!
//! Delivery is best-effort and at-most-once: failures are logged for the
//! operator and never surface to the reporting device, there are no retries,
//! and the alert engine state committed before the send is not rolled back
//! on failure.

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;

use crate::config::Config;

// ---

/// Bound on a single Telegram API call so repeated failures cannot pile up
/// hung connections.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Messaging-channel client for alert and lifecycle notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    // ---
    client: Client,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

impl Notifier {
    /// Build a notifier from configuration.
    ///
    /// Missing credentials disable dispatch (reported once at startup)
    /// rather than failing boot, so the relay still serves the dashboard.
    pub fn from_config(config: &Config) -> Self {
        // ---
        let enabled = !config.bot_token.is_empty() && !config.chat_id.is_empty();
        if !enabled {
            tracing::warn!(
                "TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set, notifications disabled"
            );
        }

        Self {
            client: Client::new(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            enabled,
        }
    }

    /// Whether dispatch is configured.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Send one text message to the configured chat.
    ///
    /// Errors are stripped of the request URL so the bot token never
    /// reaches the logs.
    pub async fn send(&self, text: &str) -> Result<()> {
        // ---
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let response = self
            .client
            .post(&url)
            .timeout(SEND_TIMEOUT)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| anyhow!("sendMessage request failed: {}", e.without_url()))?;

        if !response.status().is_success() {
            return Err(anyhow!("Telegram API returned {}", response.status()));
        }

        Ok(())
    }

    /// Dispatch a message off the request path.
    ///
    /// The send runs on a detached task: the caller never awaits or joins
    /// it, and a failure is logged and dropped (at-most-once, no retry).
    pub fn send_detached(&self, text: String) {
        // ---
        if !self.enabled {
            tracing::debug!("notification suppressed (dispatch disabled): {}", text);
            return;
        }

        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send(&text).await {
                tracing::error!("Failed to deliver notification: {}", e);
            }
        });
    }
}
