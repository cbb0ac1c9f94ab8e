use std::future::Future;

use cdr_config::{AnalysisConfig, BackendKind};
use serde_json::Value;

use crate::error::AnalysisError;
use crate::gemini::GeminiBackend;
use crate::proxy::ProxyBackend;
use crate::request::AnalysisRequest;

/// Something that turns an [`AnalysisRequest`] into the model's raw JSON answer.
///
/// Implementations classify failures but do not interpret the answer; that
/// is the job of [`crate::normalize`].
pub trait AnalysisBackend {
    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<Value, AnalysisError>> + Send;
}

/// Backend chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredBackend {
    Gemini(GeminiBackend),
    Proxy(ProxyBackend),
}

impl ConfiguredBackend {
    /// Build the configured backend. `api_key` is the already-resolved
    /// credential; the proxy ignores it.
    pub fn from_config(
        config: &AnalysisConfig,
        api_key: Option<String>,
    ) -> Result<Self, AnalysisError> {
        Ok(match config.backend {
            BackendKind::Gemini => Self::Gemini(GeminiBackend::from_config(config, api_key)?),
            BackendKind::Proxy => Self::Proxy(ProxyBackend::from_config(config)?),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Gemini(_) => BackendKind::Gemini,
            Self::Proxy(_) => BackendKind::Proxy,
        }
    }
}

impl AnalysisBackend for ConfiguredBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        match self {
            Self::Gemini(backend) => backend.analyze(request).await,
            Self::Proxy(backend) => backend.analyze(request).await,
        }
    }
}
