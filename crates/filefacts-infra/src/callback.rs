use anyhow::{Context, Result};
use filefacts_core::models::TaskOutcome;
use filefacts_core::Config;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Callback request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Callback returned non-2xx status: {status} - {body}")]
    Status { status: u16, body: String },
}

/// Delivers task outcomes to the orchestrator's callback URL
#[derive(Clone)]
pub struct CallbackClient {
    http_client: Client,
}

impl CallbackClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for callbacks")?;

        Ok(Self { http_client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(Duration::from_secs(config.callback_timeout_secs))
    }

    /// POST the outcome once. Failures are logged, not returned or retried.
    #[tracing::instrument(skip(self, outcome), fields(task_id = %outcome.task_id, status = ?outcome.status))]
    pub async fn deliver(&self, url: &str, outcome: &TaskOutcome) {
        match self.send(url, outcome).await {
            Ok(status) => {
                tracing::debug!(status_code = status, "Callback delivered");
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Callback delivery failed");
            }
        }
    }

    /// POST the outcome and report the response status.
    pub async fn send(&self, url: &str, outcome: &TaskOutcome) -> Result<u16, CallbackError> {
        let response = self
            .http_client
            .post(url)
            .header("User-Agent", "filefacts-callback/1.0")
            .json(outcome)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(status.as_u16());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Failed to read response body"));
        Err(CallbackError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
