//! Telegram Bot API notifier.

use crate::error::PipelineError;
use crate::services::notifier::Notifier;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Payload structure for the Telegram `sendMessage` endpoint.
#[derive(Serialize)]
struct TelegramMessage {
    chat_id: String,
    text: String,
    parse_mode: String,
}

pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            bot_token,
            chat_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Point the notifier at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), PipelineError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let payload = TelegramMessage {
            chat_id: self.chat_id.clone(),
            text: message.to_string(),
            parse_mode: "Markdown".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PipelineError::NotificationFailure(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::NotificationFailure(format!(
                "Telegram API returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
