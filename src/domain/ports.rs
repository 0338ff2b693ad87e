use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Report the failure and keep polling.
    Continue,
    /// Report the failure and stop the loop.
    Exit,
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn practicum_token(&self) -> &str;
    fn telegram_api_url(&self) -> &str;
    fn telegram_token(&self) -> &str;
    fn telegram_chat_id(&self) -> &str;
    fn retry_period(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn failure_policy(&self) -> FailurePolicy;
}

/// Source of homework status updates.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Decoded payload of one request; shape checks happen in the validator.
    async fn fetch_updates(&self, from_timestamp: i64) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}
