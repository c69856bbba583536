//! Telegram bot delivery.
//!
//! Darvas alerts go through the Darvas bot, moving-average alerts through the
//! general bot. Both post to the same chat. Missing credentials turn delivery
//! into a logged no-op.

use crate::config::TelegramConfig;
use crate::error::{AppError, Result};
use crate::notify::{format_alert, Notifier, Room};
use crate::types::Alert;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Telegram `sendMessage` client.
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, config })
    }

    /// Token for a room, `None` when delivery is not configured.
    fn token_for(&self, room: Room) -> Option<&str> {
        match room {
            Room::General => self.config.bot_token.as_deref(),
            Room::Darvas => self.config.darvas_bot_token.as_deref(),
        }
    }

    pub fn is_configured(&self, room: Room) -> bool {
        self.token_for(room).is_some() && self.config.chat_id.is_some()
    }

    /// `{api}/bot{token}/sendMessage`.
    pub fn send_url(&self, token: &str) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            token
        )
    }

    /// Send raw Markdown text to a room.
    pub async fn send_text(&self, text: &str, room: Room) -> Result<()> {
        let (Some(token), Some(chat_id)) = (self.token_for(room), self.config.chat_id.as_deref())
        else {
            debug!("Telegram not configured for {:?} room, skipping message", room);
            return Ok(());
        };

        let body = SendMessage {
            chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.send_url(token))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Notify(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            warn!("Telegram rejected message: {} {}", status, detail);
            return Err(AppError::ExternalApi(format!(
                "Telegram rejected message: {}",
                status
            )));
        }

        info!("Notification sent to Telegram ({:?} room)", room);
        Ok(())
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, alert: &Alert) -> Result<()> {
        let text = format_alert(alert);
        self.send_text(&text, Room::for_alert(alert)).await
    }
}
