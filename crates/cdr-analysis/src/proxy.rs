//! Client for an HTTP service implementing `POST /api/audit`.
//!
//! The service holds its own credential. It answers with the analysis JSON
//! on success and `{"error": "..."}` otherwise.

use std::time::Duration;

use cdr_config::AnalysisConfig;
use serde_json::Value;

use crate::backend::AnalysisBackend;
use crate::error::AnalysisError;
use crate::http::{build_client, check_response, parse_model_json};
use crate::request::AnalysisRequest;

#[derive(Debug, Clone)]
pub struct ProxyBackend {
    http: reqwest::Client,
    url: String,
}

impl ProxyBackend {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AnalysisError> {
        Ok(Self {
            http: build_client(timeout)?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        Self::new(
            config.proxy_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AnalysisBackend for ProxyBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        tracing::debug!(url = %self.url, "sending audit request to proxy");
        let resp = self.http.post(&self.url).json(request).send().await?;
        let body = check_response(resp).await?;
        parse_model_json(&body)
    }
}
