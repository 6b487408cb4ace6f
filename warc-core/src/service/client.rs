use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a response (refused, reset, timed out).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("Service returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body was not the JSON shape the page expects.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Transport to the external prediction services.
///
/// One implementation per backend; the HTTP backend lives in its own crate.
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// POSTs `body` as JSON to `url` and returns the decoded JSON response.
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> Result<Value, ServiceError>;
}
