//! # cdr-wizard
//!
//! The audit wizard as a state machine, independent of any front end.
//!
//! [`WizardController`] owns the transient form (consigne, context answers,
//! quick-test answers), the [`cdr_analysis::AuditClient`] and the
//! [`cdr_store::PortfolioStore`]. Front ends call its operations and render
//! whatever [`WizardStep`] it is on.

mod controller;
mod error;
pub mod progress;
mod step;

pub use controller::{ErrorBanner, PendingAudit, SubmissionOutcome, WizardController};
pub use error::WizardError;
pub use progress::{PROGRESS_MESSAGES, progress_message};
pub use step::WizardStep;
