//! End-to-end flows through the wizard controller with stub backends.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cdr_analysis::{AnalysisBackend, AnalysisError, AnalysisRequest, AuditClient, RejectionReason};
use cdr_core::entities::SubScores;
use cdr_core::enums::{AnswerWeight, ContextQuestion, VulnerabilityStatus};
use cdr_store::{KeyValueStore, MemoryStore, PortfolioStore, StoreError};
use cdr_wizard::{SubmissionOutcome, WizardController, WizardError, WizardStep};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Returns fixed sub-scores and counts its calls.
#[derive(Clone)]
struct StubBackend {
    answer: Value,
    calls: Arc<AtomicUsize>,
}

impl StubBackend {
    fn scoring(r: u8, c: u8, t: u8, m: u8) -> Self {
        Self {
            answer: json!({
                "reproductibilite": r,
                "contextualisation": c,
                "tacitite": t,
                "multimodalite": m,
                "score_total": r + c + t + m,
                "statut": "Vulnérabilité critique",
                "points_vigilance": ["Production écrite réalisée hors surveillance"],
                "recommandations": [{
                    "action": "Ajouter une soutenance orale",
                    "fiche": "Fiche 5 — Soutenance orale sans écrit préalable"
                }]
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl AnalysisBackend for StubBackend {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

struct RejectingBackend;

impl AnalysisBackend for RejectingBackend {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        Err(AnalysisError::Rejected {
            reason: RejectionReason::InvalidCredential,
            message: "API key not valid".into(),
        })
    }
}

/// Nothing stored, and every write refused.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "/read-only".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.set(key, "")
    }
}

fn wizard<B: AnalysisBackend>(backend: B) -> WizardController<B, MemoryStore> {
    WizardController::new(
        AuditClient::new(backend),
        PortfolioStore::load(MemoryStore::new()),
    )
}

const CONSIGNE: &str = "Rédigez un rapport de 5 pages sur la gestion de projet agile.";

fn fill_form<B: AnalysisBackend, S: KeyValueStore>(wizard: &mut WizardController<B, S>) {
    wizard.start_audit().unwrap();
    wizard.set_consigne(CONSIGNE).unwrap();
    wizard.continue_to_questions().unwrap();
    wizard
        .answer_context(ContextQuestion::Synchrone, "Non, entièrement asynchrone")
        .unwrap();
    wizard
        .answer_context(ContextQuestion::Donnees, "Non, données génériques")
        .unwrap();
    wizard
        .answer_context(ContextQuestion::Processus, "Non, seul le produit final")
        .unwrap();
}

#[tokio::test]
async fn written_report_audit_lands_first_in_portfolio() {
    let backend = StubBackend::scoring(0, 0, 1, 0);
    let mut wizard = wizard(backend);
    // An older entry, to check ordering.
    wizard.start_quick_test().unwrap();
    for _ in 0..8 {
        wizard
            .answer_quick_test(AnswerWeight::Partially, Utc::now())
            .unwrap();
    }
    wizard.home().unwrap();

    fill_form(&mut wizard);
    assert!(wizard.can_submit());
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
    assert_eq!(wizard.submit(now).await, SubmissionOutcome::Completed);

    assert_eq!(wizard.step(), WizardStep::AuditResult);
    let result = wizard.current_result().expect("result shown");
    assert_eq!(result.scores, SubScores::new(0, 0, 1, 0));
    assert_eq!(result.score_total, 1);
    assert_eq!(result.statut, VulnerabilityStatus::Critique);
    assert_eq!(result.statut.label(), "Vulnérabilité critique");

    let portfolio = wizard.portfolio().entries();
    assert_eq!(portfolio.len(), 2);
    assert_eq!(portfolio[0].id, result.id);
    assert_eq!(portfolio[0].consigne, CONSIGNE);
}

#[tokio::test]
async fn begin_twice_sends_one_request() {
    let backend = StubBackend::scoring(1, 1, 1, 1);
    let calls = Arc::clone(&backend.calls);
    let mut wizard = wizard(backend);
    fill_form(&mut wizard);

    let pending = wizard.begin_submission().expect("first submission starts");
    assert!(wizard.begin_submission().is_none());
    assert_eq!(wizard.submit(Utc::now()).await, SubmissionOutcome::Skipped);

    let outcome = wizard.client().run(pending.request, Utc::now()).await;
    assert_eq!(wizard.complete_submission(outcome), SubmissionOutcome::Completed);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(wizard.portfolio().len(), 1);
    assert!(!wizard.is_busy());
}

#[tokio::test]
async fn failed_audit_stays_on_questions_with_banner() {
    let mut wizard = wizard(RejectingBackend);
    fill_form(&mut wizard);

    assert_eq!(wizard.submit(Utc::now()).await, SubmissionOutcome::Failed);

    assert_eq!(wizard.step(), WizardStep::AuditQuestions);
    assert!(wizard.current_result().is_none());
    assert!(wizard.portfolio().is_empty());
    assert!(!wizard.is_busy());
    let banner = wizard.error().expect("banner");
    assert_eq!(banner.kind, "rejected");
    assert!(banner.suggest_new_key);

    // The form survives and can be resubmitted.
    assert_eq!(wizard.consigne(), CONSIGNE);
    assert!(wizard.can_submit());
}

#[test]
fn quick_test_all_yes_is_critical() {
    let mut wizard = wizard(StubBackend::scoring(0, 0, 0, 0));
    wizard.start_quick_test().unwrap();

    let mut last = None;
    for _ in 0..8 {
        last = Some(wizard.answer_quick_test(AnswerWeight::Yes, Utc::now()).unwrap());
    }
    let estimate = last.unwrap();
    assert!(estimate.complete);
    assert_eq!(estimate.robustness, 0);
    assert_eq!(estimate.status, VulnerabilityStatus::Critique);

    assert_eq!(wizard.step(), WizardStep::AuditResult);
    let result = wizard.current_result().unwrap();
    assert!(result.id.starts_with("qt-"));
    assert_eq!(result.score_total, 0);
    assert_eq!(wizard.portfolio().entries()[0].id, result.id);
}

#[test]
fn quick_test_all_no_is_robust() {
    let mut wizard = wizard(StubBackend::scoring(0, 0, 0, 0));
    wizard.start_quick_test().unwrap();
    for _ in 0..8 {
        wizard.answer_quick_test(AnswerWeight::No, Utc::now()).unwrap();
    }
    let result = wizard.current_result().unwrap();
    assert_eq!(result.score_total, 12);
    assert_eq!(result.statut, VulnerabilityStatus::Robuste);
    assert!(result.is_consistent());
}

#[test]
fn quick_test_partial_estimate_never_fails() {
    let mut wizard = wizard(StubBackend::scoring(0, 0, 0, 0));
    wizard.start_quick_test().unwrap();
    let estimate = wizard.quick_test_estimate();
    assert_eq!(estimate.answered, 0);

    let estimate = wizard
        .answer_quick_test(AnswerWeight::Yes, Utc::now())
        .unwrap();
    assert_eq!(estimate.answered, 1);
    assert!(!estimate.complete);
    assert_eq!(wizard.step(), WizardStep::QuickTest);
}

#[test]
fn opening_and_removing_portfolio_entries() {
    let mut wizard = wizard(StubBackend::scoring(0, 0, 0, 0));
    wizard.start_quick_test().unwrap();
    for _ in 0..8 {
        wizard.answer_quick_test(AnswerWeight::No, Utc::now()).unwrap();
    }
    let id = wizard.current_result().unwrap().id.clone();
    wizard.home().unwrap();
    assert!(wizard.current_result().is_none());

    wizard.open_portfolio().unwrap();
    assert!(matches!(
        wizard.open_entry("missing"),
        Err(WizardError::EntryNotFound(_))
    ));
    assert_eq!(wizard.open_entry(&id).unwrap().id, id);
    assert_eq!(wizard.step(), WizardStep::AuditResult);

    assert!(wizard.remove_entry(&id).unwrap());
    assert!(!wizard.remove_entry(&id).unwrap());
    assert!(wizard.portfolio().is_empty());
}

#[test]
fn result_screen_only_leads_home() {
    let mut wizard = wizard(StubBackend::scoring(0, 0, 0, 0));
    wizard.start_quick_test().unwrap();
    for _ in 0..8 {
        wizard.answer_quick_test(AnswerWeight::No, Utc::now()).unwrap();
    }
    assert!(matches!(
        wizard.start_audit(),
        Err(WizardError::InvalidTransition {
            from: WizardStep::AuditResult,
            to: WizardStep::AuditInput
        })
    ));
    wizard.back().unwrap();
    assert_eq!(wizard.step(), WizardStep::Welcome);
}

#[tokio::test]
async fn unsaved_result_is_shown_with_storage_banner() {
    let mut wizard = WizardController::new(
        AuditClient::new(StubBackend::scoring(2, 2, 2, 2)),
        PortfolioStore::load(ReadOnlyStore),
    );
    fill_form(&mut wizard);

    assert_eq!(wizard.submit(Utc::now()).await, SubmissionOutcome::Completed);

    assert_eq!(wizard.step(), WizardStep::AuditResult);
    assert_eq!(wizard.current_result().unwrap().score_total, 8);
    assert!(wizard.portfolio().is_empty());
    let banner = wizard.error().expect("banner");
    assert_eq!(banner.kind, "storage");
    assert!(!banner.suggest_new_key);
}
