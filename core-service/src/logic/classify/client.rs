//! Classification API Client
//!
//! HTTP client for the remote XSS / phishing classifier.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::types::{CheckKind, ClassificationResult, HealthResponse};
use crate::config::Config;
use crate::constants;

/// Anything that can classify a payload or URL
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn check(&self, kind: CheckKind, input: &str) -> Result<ClassificationResult, ClassifyError>;
}

/// Classification client errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// Submitted input was empty; no request is issued
    #[error("input must not be empty")]
    EmptyInput,

    /// Non-2xx response, body kept verbatim
    #[error("{status} {body}")]
    Api { status: u16, body: String },

    /// Transport failure (unreachable host, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx response whose body is not a classification result
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// HTTP client for the classifier
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create new client from configuration
    pub fn new(config: &Config) -> Result<Self, ClassifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check server health
    pub async fn health(&self) -> Result<HealthResponse, ClassifyError> {
        let url = self.endpoint(constants::HEALTH_PATH);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))
    }

    /// Submit a payload or URL for classification
    pub async fn classify(&self, kind: CheckKind, input: &str) -> Result<ClassificationResult, ClassifyError> {
        if input.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        let url = self.endpoint(kind.path());
        tracing::debug!("POST {} ({} chars)", url, input.len());

        let response = self.http_client
            .post(&url)
            .json(&kind.request_body(input))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{} check failed to reach {}: {}", kind, url, e);
                ClassifyError::Network(e.to_string())
            })?;

        let body = read_success_body(response).await?;
        parse_result(&body)
    }
}

#[async_trait]
impl Classifier for ApiClient {
    async fn check(&self, kind: CheckKind, input: &str) -> Result<ClassificationResult, ClassifyError> {
        self.classify(kind, input).await
    }
}

/// Return the body of a 2xx response, or an `Api` error carrying the raw body
async fn read_success_body(response: reqwest::Response) -> Result<String, ClassifyError> {
    let status = response.status();

    if status.is_success() {
        response.text().await
            .map_err(|e| ClassifyError::Network(e.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Classifier returned {}: {}", status.as_u16(), body);
        Err(ClassifyError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Schema check for a classifier response body
pub fn parse_result(body: &str) -> Result<ClassificationResult, ClassifyError> {
    serde_json::from_str(body)
        .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))
}
