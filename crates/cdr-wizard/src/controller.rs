//! The wizard controller: owns the form state, the audit client and the
//! portfolio, and moves between steps.

use cdr_analysis::{AnalysisBackend, AnalysisError, AnalysisRequest, AuditClient, ErrorKind};
use cdr_core::entities::{AuditResult, ContextAnswers};
use cdr_core::enums::{AnswerWeight, ContextQuestion};
use cdr_core::quick_test::{QuickTest, QuickTestEstimate};
use cdr_store::{KeyValueStore, PortfolioStore};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::WizardError;
use crate::step::WizardStep;

/// Error shown above the audit questions after a failed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBanner {
    pub message: String,
    pub kind: &'static str,
    /// Offer to enter another API key.
    pub suggest_new_key: bool,
}

impl ErrorBanner {
    fn from_analysis(error: &AnalysisError) -> Self {
        Self {
            message: error.to_string(),
            kind: error.kind().as_str(),
            suggest_new_key: error.suggests_new_credential()
                || error.kind() == ErrorKind::Credential,
        }
    }
}

/// A submission that has been started and must be completed with
/// [`WizardController::complete_submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAudit {
    pub request: AnalysisRequest,
}

/// What became of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The result is shown and was prepended to the portfolio.
    Completed,
    /// The analysis failed; the error banner is set.
    Failed,
    /// Nothing was sent: busy, wrong step, or incomplete form.
    Skipped,
}

#[derive(Debug)]
pub struct WizardController<B, S> {
    client: AuditClient<B>,
    portfolio: PortfolioStore<S>,
    step: WizardStep,
    consigne: String,
    context: ContextAnswers,
    quick_test: QuickTest,
    current: Option<AuditResult>,
    error: Option<ErrorBanner>,
    busy: bool,
}

impl<B: AnalysisBackend, S: KeyValueStore> WizardController<B, S> {
    pub fn new(client: AuditClient<B>, portfolio: PortfolioStore<S>) -> Self {
        Self {
            client,
            portfolio,
            step: WizardStep::Welcome,
            consigne: String::new(),
            context: ContextAnswers::default(),
            quick_test: QuickTest::new(),
            current: None,
            error: None,
            busy: false,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub const fn step(&self) -> WizardStep {
        self.step
    }

    pub fn consigne(&self) -> &str {
        &self.consigne
    }

    pub const fn context(&self) -> &ContextAnswers {
        &self.context
    }

    pub const fn quick_test(&self) -> &QuickTest {
        &self.quick_test
    }

    /// Result shown on the result screen.
    pub const fn current_result(&self) -> Option<&AuditResult> {
        self.current.as_ref()
    }

    pub const fn portfolio(&self) -> &PortfolioStore<S> {
        &self.portfolio
    }

    pub const fn client(&self) -> &AuditClient<B> {
        &self.client
    }

    /// Swap the audit client, e.g. after the user entered a new API key.
    pub fn set_client(&mut self, client: AuditClient<B>) {
        self.client = client;
    }

    pub const fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn into_portfolio(self) -> PortfolioStore<S> {
        self.portfolio
    }

    // -- navigation ---------------------------------------------------------

    fn go(&mut self, to: WizardStep) -> Result<(), WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }
        if !self.step.can_transition_to(to) {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to,
            });
        }
        tracing::debug!(from = %self.step, %to, "wizard transition");
        self.step = to;
        Ok(())
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn reset_form(&mut self) {
        self.consigne.clear();
        self.context = ContextAnswers::default();
        self.quick_test.clear();
        self.current = None;
        self.error = None;
    }

    pub fn start_audit(&mut self) -> Result<(), WizardError> {
        self.go(WizardStep::AuditInput)
    }

    /// Go back one screen. Leaving a result or the portfolio resets the form,
    /// like [`Self::home`].
    pub fn back(&mut self) -> Result<(), WizardError> {
        let Some(previous) = self.step.previous() else {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: WizardStep::Welcome,
            });
        };
        if previous == WizardStep::Welcome {
            return self.home();
        }
        self.go(previous)
    }

    /// Return to the welcome screen from anywhere, clearing the form.
    pub fn home(&mut self) -> Result<(), WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }
        self.step = WizardStep::Welcome;
        self.reset_form();
        Ok(())
    }

    // -- detailed audit -----------------------------------------------------

    pub fn set_consigne(&mut self, consigne: impl Into<String>) -> Result<(), WizardError> {
        self.expect_step(WizardStep::AuditInput)?;
        self.consigne = consigne.into();
        Ok(())
    }

    pub fn continue_to_questions(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::AuditInput)?;
        if self.consigne.trim().is_empty() {
            return Err(WizardError::EmptyConsigne);
        }
        self.go(WizardStep::AuditQuestions)
    }

    pub fn answer_context(
        &mut self,
        question: ContextQuestion,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.expect_step(WizardStep::AuditQuestions)?;
        if self.busy {
            return Err(WizardError::Busy);
        }
        self.context.set(question, value);
        Ok(())
    }

    /// All context questions answered and no request in flight.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::AuditQuestions && !self.busy && self.context.is_complete()
    }

    /// Mark a submission as in flight and hand out its request.
    ///
    /// Returns `None` (and changes nothing) when a submission is already in
    /// flight or the form is incomplete.
    pub fn begin_submission(&mut self) -> Option<PendingAudit> {
        if !self.can_submit() {
            return None;
        }
        let request = AnalysisRequest::new(&self.consigne, &self.context).ok()?;
        self.busy = true;
        self.error = None;
        Some(PendingAudit { request })
    }

    /// Finish the in-flight submission with the analysis outcome.
    pub fn complete_submission(
        &mut self,
        outcome: Result<AuditResult, AnalysisError>,
    ) -> SubmissionOutcome {
        if !self.busy {
            tracing::warn!("submission completed while none was in flight; ignoring");
            return SubmissionOutcome::Skipped;
        }
        self.busy = false;

        match outcome {
            Ok(result) => {
                self.show_new_result(result);
                SubmissionOutcome::Completed
            }
            Err(error) => {
                tracing::warn!(kind = %error.kind(), %error, "audit failed");
                self.error = Some(ErrorBanner::from_analysis(&error));
                SubmissionOutcome::Failed
            }
        }
    }

    /// Run a whole submission: begin, call the backend, complete.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> SubmissionOutcome {
        let Some(pending) = self.begin_submission() else {
            return SubmissionOutcome::Skipped;
        };
        let outcome = self.client.run(pending.request, now).await;
        self.complete_submission(outcome)
    }

    /// Prepend a fresh result to the portfolio and show it. A failed write
    /// keeps the result on screen and reports through the banner.
    fn show_new_result(&mut self, result: AuditResult) {
        self.current = Some(result.clone());
        if let Err(error) = self.portfolio.append(result) {
            tracing::warn!(%error, "result could not be saved to the portfolio");
            self.error = Some(ErrorBanner {
                message: format!("Résultat non enregistré dans le portfolio : {error}"),
                kind: "storage",
                suggest_new_key: false,
            });
        }
        self.step = WizardStep::AuditResult;
    }

    // -- quick test ---------------------------------------------------------

    pub fn start_quick_test(&mut self) -> Result<(), WizardError> {
        self.go(WizardStep::QuickTest)?;
        self.quick_test.clear();
        Ok(())
    }

    /// Answer the next unanswered question. The last answer saves the result
    /// to the portfolio and moves to the result screen.
    pub fn answer_quick_test(
        &mut self,
        weight: AnswerWeight,
        now: DateTime<Utc>,
    ) -> Result<QuickTestEstimate, WizardError> {
        self.expect_step(WizardStep::QuickTest)?;
        let index = self
            .quick_test
            .next_unanswered()
            .ok_or(WizardError::QuickTestComplete)?;
        self.quick_test.answer(index, weight)?;

        let estimate = self.quick_test.estimate();
        if estimate.complete {
            let result = self.quick_test.materialize(now)?;
            self.show_new_result(result);
        }
        Ok(estimate)
    }

    pub fn quick_test_estimate(&self) -> QuickTestEstimate {
        self.quick_test.estimate()
    }

    // -- portfolio ----------------------------------------------------------

    pub fn open_portfolio(&mut self) -> Result<(), WizardError> {
        self.go(WizardStep::Portfolio)
    }

    pub fn open_entry(&mut self, id: &str) -> Result<&AuditResult, WizardError> {
        self.expect_step(WizardStep::Portfolio)?;
        let entry = self
            .portfolio
            .get(id)
            .cloned()
            .ok_or_else(|| WizardError::EntryNotFound(id.to_string()))?;
        self.go(WizardStep::AuditResult)?;
        Ok(self.current.insert(entry))
    }

    /// Remove one entry. `false` when no entry has that id.
    pub fn remove_entry(&mut self, id: &str) -> Result<bool, WizardError> {
        Ok(self.portfolio.remove(id)?)
    }

    /// Empty the portfolio if `confirmed`. Returns whether anything happened.
    pub fn clear_portfolio(&mut self, confirmed: bool) -> Result<bool, WizardError> {
        if !confirmed {
            return Ok(false);
        }
        self.portfolio.clear()?;
        Ok(true)
    }
}
