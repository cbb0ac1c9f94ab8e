use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ContextQuestion;

/// Answers to the three contextual questions of a detailed audit.
///
/// Each answer is normally one of [`ContextQuestion::options`], but any
/// non-empty text is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContextAnswers {
    #[serde(default)]
    pub synchrone: String,
    #[serde(default)]
    pub donnees: String,
    #[serde(default)]
    pub processus: String,
}

impl ContextAnswers {
    /// Placeholder answers recorded for results that had no context step.
    #[must_use]
    pub fn not_applicable() -> Self {
        Self {
            synchrone: "N/A".into(),
            donnees: "N/A".into(),
            processus: "N/A".into(),
        }
    }

    #[must_use]
    pub fn get(&self, question: ContextQuestion) -> &str {
        match question {
            ContextQuestion::Synchrone => &self.synchrone,
            ContextQuestion::Donnees => &self.donnees,
            ContextQuestion::Processus => &self.processus,
        }
    }

    pub fn set(&mut self, question: ContextQuestion, value: impl Into<String>) {
        let slot = match question {
            ContextQuestion::Synchrone => &mut self.synchrone,
            ContextQuestion::Donnees => &mut self.donnees,
            ContextQuestion::Processus => &mut self.processus,
        };
        *slot = value.into();
    }

    /// Whether the question has a non-blank answer.
    #[must_use]
    pub fn is_answered(&self, question: ContextQuestion) -> bool {
        !self.get(question).trim().is_empty()
    }

    /// All three questions answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        ContextQuestion::ALL.iter().all(|q| self.is_answered(*q))
    }

    /// Questions still waiting for an answer, in display order.
    #[must_use]
    pub fn missing(&self) -> Vec<ContextQuestion> {
        ContextQuestion::ALL
            .into_iter()
            .filter(|q| !self.is_answered(*q))
            .collect()
    }
}
