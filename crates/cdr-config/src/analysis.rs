//! Analysis backend configuration.

use serde::{Deserialize, Serialize};

/// Which backend performs the analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Direct call to the Generative Language API.
    #[default]
    Gemini,
    /// HTTP proxy exposing the `/api/audit` contract.
    Proxy,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Proxy => "proxy",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_proxy_url() -> String {
    "http://localhost:3000/api/audit".to_string()
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Base URL of the Generative Language REST API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Full URL of the audit proxy endpoint.
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API key used when neither `--api-key` nor a stored key is present.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            endpoint: default_endpoint(),
            proxy_url: default_proxy_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The direct backend needs a credential; the proxy holds its own.
    #[must_use]
    pub const fn requires_api_key(&self) -> bool {
        matches!(self.backend, BackendKind::Gemini)
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}
