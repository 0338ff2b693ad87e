use crate::domain::ports::{ConfigProvider, HomeworkSource};
use crate::utils::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Client for the Practicum homework status endpoint.
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifierError::ConnectivityError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.endpoint(),
            config.practicum_token(),
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch_updates(&self, from_timestamp: i64) -> Result<serde_json::Value> {
        tracing::debug!(
            "Requesting {} with from_date={}",
            self.endpoint,
            from_timestamp
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_timestamp)])
            .send()
            .await
            .map_err(|e| NotifierError::ConnectivityError {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::ConnectivityError {
                message: format!("{} returned HTTP {}: {}", self.endpoint, status, body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| NotifierError::ConnectivityError {
                message: e.to_string(),
            })?;

        serde_json::from_slice(&body).map_err(|e| NotifierError::DecodeError {
            message: e.to_string(),
        })
    }
}
