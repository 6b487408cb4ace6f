use std::{error::Error, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use warc_core::service::{PredictionService, ServiceError};

/// [`PredictionService`] that POSTs JSON over HTTP or HTTPS.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    client: reqwest::Client,
}

impl HttpPredictionService {
    /// Builds a client. `timeout` bounds each whole request; `None` waits
    /// indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> Result<Value, ServiceError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(transport)?;
        debug!(url, status = status.as_u16(), "Service responded");

        if !status.is_success() {
            return Err(ServiceError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

/// Keeps the whole cause chain; reqwest's own message rarely names the
/// actual failure.
fn transport(error: reqwest::Error) -> ServiceError {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ServiceError::Transport(message)
}
