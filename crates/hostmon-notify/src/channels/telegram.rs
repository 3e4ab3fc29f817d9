use crate::utils::{mask_secret, truncate_string, MAX_BODY_LENGTH};
use crate::{NotificationChannel, NotifyError, Result};
use async_trait::async_trait;
use hostmon_common::types::AlertEvent;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[telegram]` section of the monitor configuration.
///
/// Without both `bot_token` and `chat_id` no channel is built.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Serialize)]
struct TelegramMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Posts alert messages to one Telegram chat through the Bot API.
pub struct TelegramChannel {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannel")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramChannel {
    pub fn new(config: &TelegramConfig, bot_token: &str, chat_id: &str) -> Result<Self> {
        if bot_token.trim().is_empty() {
            return Err(NotifyError::InvalidConfig("empty bot_token".to_string()));
        }
        if chat_id.trim().is_empty() {
            return Err(NotifyError::InvalidConfig("empty chat_id".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{bot_token}/sendMessage",
                config.api_base.trim_end_matches('/')
            ),
            chat_id: chat_id.to_string(),
        })
    }

    /// Builds the channel when credentials are configured, `Ok(None)` otherwise.
    pub fn from_config(config: &TelegramConfig) -> Result<Option<Self>> {
        match (config.bot_token.as_deref(), config.chat_id.as_deref()) {
            (Some(token), Some(chat_id)) => {
                tracing::info!(
                    chat_id,
                    bot_token = %mask_secret(token),
                    "Telegram channel configured"
                );
                Self::new(config, token, chat_id).map(Some)
            }
            (None, None) => Ok(None),
            _ => Err(NotifyError::InvalidConfig(
                "bot_token and chat_id must be set together".to_string(),
            )),
        }
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    async fn send(&self, alert: &AlertEvent) -> Result<()> {
        let payload = TelegramMessage {
            chat_id: &self.chat_id,
            text: &alert.message,
            parse_mode: "Markdown",
        };

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(kind = ?alert.kind, "Telegram message accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::ApiError {
            service: self.channel_name().to_string(),
            status: status.as_u16(),
            body: truncate_string(&body, MAX_BODY_LENGTH),
        })
    }

    fn channel_name(&self) -> &str {
        "telegram"
    }
}
