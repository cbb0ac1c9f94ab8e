use std::fmt;

use serde::{Deserialize, Serialize};

/// Screen the wizard is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Welcome,
    AuditInput,
    AuditQuestions,
    AuditResult,
    QuickTest,
    Portfolio,
}

impl WizardStep {
    /// Valid next steps from the current one.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Welcome => &[Self::AuditInput, Self::QuickTest, Self::Portfolio],
            Self::AuditInput => &[Self::AuditQuestions, Self::Welcome],
            Self::AuditQuestions => &[Self::AuditResult, Self::AuditInput, Self::Welcome],
            Self::QuickTest | Self::Portfolio => &[Self::AuditResult, Self::Welcome],
            Self::AuditResult => &[Self::Welcome],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Step reached by going back one screen, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Welcome => None,
            Self::AuditQuestions => Some(Self::AuditInput),
            Self::AuditInput | Self::AuditResult | Self::QuickTest | Self::Portfolio => {
                Some(Self::Welcome)
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::AuditInput => "audit_input",
            Self::AuditQuestions => "audit_questions",
            Self::AuditResult => "audit_result",
            Self::QuickTest => "quick_test",
            Self::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
