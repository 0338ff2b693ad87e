use crate::domain::ports::{ConfigProvider, FailurePolicy};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_range, validate_required_field, validate_url, Validate};
use clap::Parser;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Parser)]
#[command(name = "homework-notifier")]
#[command(about = "Watches homework review status and reports changes to Telegram")]
pub struct NotifierConfig {
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    pub practicum_token: Option<String>,

    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    #[arg(long, env = "RETRY_PERIOD_SECS", default_value_t = DEFAULT_RETRY_PERIOD_SECS)]
    pub retry_period_secs: u64,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Unix timestamp to poll from (defaults to now)")]
    pub from_date: Option<i64>,

    #[arg(long, value_enum, default_value_t = FailurePolicy::Continue)]
    pub on_failure: FailurePolicy,

    #[arg(long, help = "Stop after this many polls")]
    pub max_iterations: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl NotifierConfig {
    pub fn start_timestamp(&self) -> i64 {
        self.from_date
            .unwrap_or_else(|| chrono::Utc::now().timestamp())
    }
}

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<set>",
        None => "<missing>",
    }
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period_secs", &self.retry_period_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("from_date", &self.from_date)
            .field("on_failure", &self.on_failure)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

impl ConfigProvider for NotifierConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn practicum_token(&self) -> &str {
        self.practicum_token.as_deref().unwrap_or_default()
    }

    fn telegram_api_url(&self) -> &str {
        &self.telegram_api_url
    }

    fn telegram_token(&self) -> &str {
        self.telegram_token.as_deref().unwrap_or_default()
    }

    fn telegram_chat_id(&self) -> &str {
        self.telegram_chat_id.as_deref().unwrap_or_default()
    }

    fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.on_failure
    }
}

impl Validate for NotifierConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("PRACTICUM_TOKEN", &self.practicum_token)?;
        validate_required_field("TELEGRAM_TOKEN", &self.telegram_token)?;
        validate_required_field("TELEGRAM_CHAT_ID", &self.telegram_chat_id)?;

        validate_url("endpoint", &self.endpoint)?;
        validate_url("telegram_api_url", &self.telegram_api_url)?;
        validate_range("retry_period_secs", self.retry_period_secs, 1, 86_400)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 300)?;

        tracing::debug!("Environment variables are present");
        Ok(())
    }
}
