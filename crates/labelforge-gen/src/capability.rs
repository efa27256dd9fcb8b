//! Generation capability boundary.
//!
//! The capability is an opaque external service: a request goes out, free-form
//! completion text comes back. Everything past this boundary treats that text
//! as untrusted until it survives parse-and-validate.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::retry::{with_retry, RetryPolicy};

/// Request envelope sent to the capability service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub model_id: String,
    /// Static market-specific regulatory instruction text.
    pub instructions: String,
    /// Rendered product prompt.
    pub prompt: String,
}

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("capability returned status {0}")]
    Status(u16),

    #[error("capability returned an empty completion")]
    Empty,
}

/// One-shot completion interface implemented by the real HTTP client and by
/// test doubles.
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CapabilityError>;
}

/// Wire shape of the capability service response.
#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    completion: String,
}

/// HTTP-backed capability client with per-call timeout and an injected retry
/// policy. Transport retries live here, not in the generation pipeline.
pub struct HttpCapability {
    http: reqwest::Client,
    endpoint: String,
    retry: RetryPolicy,
    request_timeout: Duration,
}

impl HttpCapability {
    pub fn new(endpoint: impl Into<String>, retry: RetryPolicy) -> Self {
        let request_timeout = Duration::from_secs(30);
        Self {
            http: reqwest::Client::builder()
                .timeout(request_timeout)
                .build()
                .expect("failed to build HTTP client"),
            endpoint: endpoint.into(),
            retry,
            request_timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self.http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        self
    }

    async fn send_once(&self, request: &GenerationRequest) -> Result<String, CapabilityError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CapabilityError::Timeout(self.request_timeout)
                } else {
                    CapabilityError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CapabilityError::Status(status.as_u16()));
        }

        let envelope: CompletionEnvelope = response
            .json()
            .await
            .map_err(|e| CapabilityError::Transport(e.to_string()))?;

        if envelope.completion.trim().is_empty() {
            return Err(CapabilityError::Empty);
        }
        Ok(envelope.completion)
    }
}

#[async_trait]
impl GenerationCapability for HttpCapability {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CapabilityError> {
        with_retry(&self.retry, || self.send_once(request)).await
    }
}
