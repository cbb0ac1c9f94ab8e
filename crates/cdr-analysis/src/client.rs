use cdr_core::entities::{AuditResult, ContextAnswers, make_title};
use cdr_core::ids::new_audit_id;
use chrono::{DateTime, Utc};

use crate::backend::AnalysisBackend;
use crate::error::AnalysisError;
use crate::normalize::normalize_response;
use crate::request::AnalysisRequest;

/// Default number of consigne characters kept in a result title.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 50;

/// Runs one audit against a backend and builds the resulting [`AuditResult`].
///
/// The client holds no state between calls and never retries.
#[derive(Debug, Clone)]
pub struct AuditClient<B> {
    backend: B,
    title_max_chars: usize,
}

impl<B: AnalysisBackend> AuditClient<B> {
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }

    #[must_use]
    pub fn with_title_max_chars(mut self, title_max_chars: usize) -> Self {
        self.title_max_chars = title_max_chars;
        self
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Audit `consigne` in `context`. Invalid input is rejected before any
    /// request is sent.
    pub async fn audit(
        &self,
        consigne: &str,
        context: &ContextAnswers,
        now: DateTime<Utc>,
    ) -> Result<AuditResult, AnalysisError> {
        let request = AnalysisRequest::new(consigne, context)?;
        self.run(request, now).await
    }

    /// Send an already-prepared request.
    pub async fn run(
        &self,
        request: AnalysisRequest,
        now: DateTime<Utc>,
    ) -> Result<AuditResult, AnalysisError> {
        let raw = self.backend.analyze(&request).await?;
        let analysis = normalize_response(&raw)?;

        let result = AuditResult::new(
            new_audit_id()?,
            make_title(&request.consigne, self.title_max_chars),
            request.consigne,
            request.context_answers,
            analysis.scores,
            analysis.points_vigilance,
            analysis.recommandations,
            analysis.justifications,
            now,
        );
        tracing::debug!(id = %result.id, total = result.score_total, statut = %result.statut, "audit complete");
        Ok(result)
    }
}
