//! Direct calls to the Generative Language REST API (`generateContent`).

use std::time::Duration;

use cdr_config::AnalysisConfig;
use serde_json::{Value, json};

use crate::backend::AnalysisBackend;
use crate::error::{AnalysisError, RejectionReason};
use crate::http::{build_client, check_response, parse_model_json};
use crate::prompt::{SYSTEM_PROMPT, response_schema, user_prompt};
use crate::request::AnalysisRequest;

/// Finish reasons that mean the candidate was withheld by content filters.
const BLOCKED_FINISH_REASONS: [&str; 4] = ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    /// A backend posting to `url` (a full `...:generateContent` URL).
    ///
    /// A missing key is reported by [`AnalysisBackend::analyze`] as
    /// [`AnalysisError::MissingCredential`], before any request is sent.
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            http: build_client(timeout)?,
            url: url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn from_config(
        config: &AnalysisConfig,
        api_key: Option<String>,
    ) -> Result<Self, AnalysisError> {
        Self::new(
            config.generate_content_url(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `generateContent` request body.
    #[must_use]
    pub fn request_body(request: &AnalysisRequest) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_prompt(request) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        })
    }
}

impl AnalysisBackend for GeminiBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AnalysisError::MissingCredential)?;

        tracing::debug!(url = %self.url, "sending generateContent request");
        let resp = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;
        let body = check_response(resp).await?;

        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::InvalidPayload(format!("enveloppe illisible ({e})")))?;
        extract_candidate_json(&envelope)
    }
}

/// Pull the model's JSON answer out of a `generateContent` response.
///
/// Blocked prompts and candidates withheld by safety filters are rejections;
/// a response without text is an empty payload.
pub fn extract_candidate_json(envelope: &Value) -> Result<Value, AnalysisError> {
    if let Some(reason) = envelope
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(AnalysisError::Rejected {
            reason: RejectionReason::Safety,
            message: format!("consigne bloquée ({reason})"),
        });
    }

    let Some(candidate) = envelope.pointer("/candidates/0") else {
        return Err(AnalysisError::EmptyPayload);
    };

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(finish) = candidate.get("finishReason").and_then(Value::as_str) {
            if BLOCKED_FINISH_REASONS.contains(&finish) {
                return Err(AnalysisError::Rejected {
                    reason: RejectionReason::Safety,
                    message: format!("réponse bloquée ({finish})"),
                });
            }
        }
        return Err(AnalysisError::EmptyPayload);
    }

    parse_model_json(&text)
}
