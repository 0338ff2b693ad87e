use crate::domain::ports::{ConfigProvider, Notifier};
use crate::utils::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single chat through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifierError::DeliveryError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.telegram_api_url(),
            config.telegram_token(),
            config.telegram_chat_id(),
            config.request_timeout(),
        )
    }

    async fn send_message(&self, text: &str) -> std::result::Result<(), String> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);

        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({"chat_id": self.chat_id, "text": text}))
            .send()
            .await
            // reqwest errors carry the URL, which contains the bot token
            .map_err(|e| e.without_url().to_string())?;

        let status = response.status();
        let reply: Option<BotApiReply> = response.json().await.ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => Ok(()),
            Some(reply) => Err(format!(
                "HTTP {}: {}",
                status,
                reply.description.unwrap_or_else(|| "no description".to_string())
            )),
            None => Err(format!("HTTP {} with unreadable body", status)),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        match self.send_message(message).await {
            Ok(()) => {
                tracing::debug!("Message sent to chat {}", self.chat_id);
                Ok(())
            }
            Err(reason) => {
                tracing::error!("Failed to send message to chat {}: {}", self.chat_id, reason);
                Err(NotifierError::DeliveryError {
                    message: format!("chat_id {}: {}", self.chat_id, reason),
                })
            }
        }
    }
}
