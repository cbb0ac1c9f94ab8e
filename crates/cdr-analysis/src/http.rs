//! Shared HTTP helpers for the analysis backends.
//!
//! Centralizes status classification (credential, quota, timeout, other)
//! and model-text parsing so each backend only builds its request and picks
//! its payload out of the response.

use std::time::Duration;

use serde_json::Value;

use crate::error::{AnalysisError, RejectionReason};

/// Longest response excerpt carried in an error message.
const MAX_MESSAGE_CHARS: usize = 300;

/// Build the shared HTTP client with the configured timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AnalysisError> {
    reqwest::Client::builder()
        .user_agent(concat!("compagnon-de-route/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(AnalysisError::Transport)
}

/// Return the response body on success, or the classified failure.
pub async fn check_response(resp: reqwest::Response) -> Result<String, AnalysisError> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(classify_failure(status, &body))
    }
}

/// Map a non-success status and its body to an [`AnalysisError`].
///
/// Understands both the Generative Language error envelope
/// (`{"error": {"message", "status", "details": [{"reason"}]}}`) and the
/// proxy's `{"error": "..."}`. Non-JSON bodies mentioning a timeout, and
/// HTTP 504/408, are timeouts.
#[must_use]
pub fn classify_failure(status: u16, body: &str) -> AnalysisError {
    if status == 504 || status == 408 {
        return AnalysisError::Timeout;
    }

    let parsed = serde_json::from_str::<Value>(body).ok();
    if parsed.is_none() && body.to_lowercase().contains("timeout") {
        return AnalysisError::Timeout;
    }

    let message = parsed
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| excerpt(body));
    let haystack = body.to_uppercase();

    let reason = if status == 401
        || status == 403
        || haystack.contains("API_KEY_INVALID")
        || haystack.contains("API KEY NOT VALID")
    {
        RejectionReason::InvalidCredential
    } else if status == 429 || haystack.contains("RESOURCE_EXHAUSTED") {
        RejectionReason::Quota
    } else {
        RejectionReason::Other { status }
    };

    tracing::debug!(status, ?reason, "analysis request rejected");
    AnalysisError::Rejected { reason, message }
}

fn error_message(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_MESSAGE_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_MESSAGE_CHARS).collect();
    cut.push('…');
    cut
}

/// Remove a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````).
#[must_use]
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse model output as JSON, tolerating a Markdown fence around it.
pub fn parse_model_json(text: &str) -> Result<Value, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyPayload);
    }
    serde_json::from_str(text.trim())
        .or_else(|_| serde_json::from_str(strip_fences(text)))
        .map_err(|e| AnalysisError::InvalidPayload(format!("JSON illisible ({e})")))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[rstest]
    #[case(401, "{}")]
    #[case(403, r#"{"error": {"message": "Permission denied"}}"#)]
    #[case(
        400,
        r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT", "details": [{"reason": "API_KEY_INVALID"}]}}"#
    )]
    fn credential_rejections(#[case] status: u16, #[case] body: &str) {
        assert!(matches!(
            classify_failure(status, body),
            AnalysisError::Rejected {
                reason: RejectionReason::InvalidCredential,
                ..
            }
        ));
    }

    #[rstest]
    #[case(429, "Too Many Requests")]
    #[case(500, r#"{"error": "[429] RESOURCE_EXHAUSTED: quota exceeded"}"#)]
    fn quota_rejections(#[case] status: u16, #[case] body: &str) {
        assert!(matches!(
            classify_failure(status, body),
            AnalysisError::Rejected {
                reason: RejectionReason::Quota,
                ..
            }
        ));
    }

    #[rstest]
    #[case(504, "<html>Gateway Timeout</html>")]
    #[case(408, "")]
    #[case(500, "FUNCTION_INVOCATION_TIMEOUT")]
    fn timeouts(#[case] status: u16, #[case] body: &str) {
        assert!(matches!(classify_failure(status, body), AnalysisError::Timeout));
    }

    #[test]
    fn json_error_mentioning_timeout_is_not_a_timeout() {
        let err = classify_failure(500, r#"{"error": "upstream timeout"}"#);
        assert!(matches!(
            err,
            AnalysisError::Rejected {
                reason: RejectionReason::Other { status: 500 },
                ..
            }
        ));
    }

    #[test]
    fn proxy_error_message_is_kept() {
        let err = classify_failure(400, r#"{"error": "Missing consigne or contextAnswers"}"#);
        match err {
            AnalysisError::Rejected { message, .. } => {
                assert_eq!(message, "Missing consigne or contextAnswers");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_fences("```\n[]\n```"), "[]");
        assert_eq!(strip_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn parse_model_json_handles_fenced_and_bad_text() {
        assert_eq!(parse_model_json("```json\n{\"a\": 1}\n```").unwrap()["a"], 1);
        assert!(matches!(parse_model_json("  "), Err(AnalysisError::EmptyPayload)));
        assert!(matches!(
            parse_model_json("Voici mon analyse"),
            Err(AnalysisError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn check_response_returns_body_on_success() {
        let body = check_response(mock_response(200, "{\"ok\": true}")).await.unwrap();
        assert_eq!(body, "{\"ok\": true}");
    }

    #[tokio::test]
    async fn check_response_classifies_failure() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(err.suggests_new_credential());
    }
}
