use cdr_core::errors::CoreError;
use cdr_store::StoreError;
use thiserror::Error;

use crate::step::WizardStep;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("cannot go from {from} to {to}")]
    InvalidTransition { from: WizardStep, to: WizardStep },

    #[error("this action needs the {expected} step (currently on {actual})")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("an audit is already in progress")]
    Busy,

    #[error("the consigne is empty")]
    EmptyConsigne,

    #[error("no portfolio entry with id '{0}'")]
    EntryNotFound(String),

    #[error("the quick test is already complete")]
    QuickTestComplete,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
