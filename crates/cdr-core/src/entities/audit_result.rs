use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ContextAnswers;
use crate::enums::{Dimension, MAX_SUB_SCORE, VulnerabilityStatus};

/// The four 0–3 dimension ratings of an assessment.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubScores {
    pub reproductibilite: u8,
    pub contextualisation: u8,
    pub tacitite: u8,
    pub multimodalite: u8,
}

impl SubScores {
    #[must_use]
    pub const fn new(
        reproductibilite: u8,
        contextualisation: u8,
        tacitite: u8,
        multimodalite: u8,
    ) -> Self {
        Self {
            reproductibilite,
            contextualisation,
            tacitite,
            multimodalite,
        }
    }

    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Reproductibilite => self.reproductibilite,
            Dimension::Contextualisation => self.contextualisation,
            Dimension::Tacitite => self.tacitite,
            Dimension::Multimodalite => self.multimodalite,
        }
    }

    pub const fn set(&mut self, dimension: Dimension, value: u8) {
        match dimension {
            Dimension::Reproductibilite => self.reproductibilite = value,
            Dimension::Contextualisation => self.contextualisation = value,
            Dimension::Tacitite => self.tacitite = value,
            Dimension::Multimodalite => self.multimodalite = value,
        }
    }

    /// Sum of the four ratings. Saturates instead of wrapping for
    /// out-of-range inputs.
    #[must_use]
    pub fn total(&self) -> u8 {
        Dimension::ALL
            .iter()
            .fold(0_u8, |acc, d| acc.saturating_add(self.get(*d)))
    }

    /// Every rating lies in 0–3.
    #[must_use]
    pub fn in_range(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d) <= MAX_SUB_SCORE)
    }
}

/// A remediation action, pointing at a sheet of the catalogue by exact name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Recommendation {
    pub action: String,
    #[serde(default)]
    pub fiche: String,
}

/// A completed audit, as shown on the result screen and stored in the portfolio.
///
/// `score_total` always equals the sum of the sub-scores and `statut` always
/// matches the band of `score_total` for values built with [`AuditResult::new`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditResult {
    pub id: String,
    pub title: String,
    pub consigne: String,
    #[serde(rename = "contextAnswers")]
    pub context_answers: ContextAnswers,
    #[serde(flatten)]
    pub scores: SubScores,
    pub score_total: u8,
    pub statut: VulnerabilityStatus,
    #[serde(default)]
    pub points_vigilance: Vec<String>,
    #[serde(default)]
    pub recommandations: Vec<Recommendation>,
    #[serde(default)]
    pub justifications: BTreeMap<String, String>,
    pub date: DateTime<Utc>,
}

impl AuditResult {
    /// Build a result, deriving `score_total` and `statut` from `scores`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        title: String,
        consigne: String,
        context_answers: ContextAnswers,
        scores: SubScores,
        points_vigilance: Vec<String>,
        recommandations: Vec<Recommendation>,
        justifications: BTreeMap<String, String>,
        date: DateTime<Utc>,
    ) -> Self {
        let score_total = scores.total();
        Self {
            id,
            title,
            consigne,
            context_answers,
            scores,
            score_total,
            statut: VulnerabilityStatus::from_total(score_total),
            points_vigilance,
            recommandations,
            justifications,
            date,
        }
    }

    /// Check the total and status invariants (useful on data read back from disk).
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.scores.in_range()
            && self.score_total == self.scores.total()
            && self.statut == VulnerabilityStatus::from_total(self.score_total)
    }

    /// Justification text for a dimension, if the analysis gave one.
    #[must_use]
    pub fn justification(&self, dimension: Dimension) -> Option<&str> {
        self.justifications
            .get(dimension.as_str())
            .map(String::as_str)
    }
}

/// The subset of a result offered for copy/export as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportView {
    #[serde(flatten)]
    pub scores: SubScores,
    pub score_total: u8,
    pub statut: VulnerabilityStatus,
    pub points_vigilance: Vec<String>,
    pub recommandations: Vec<Recommendation>,
}

impl From<&AuditResult> for ExportView {
    fn from(result: &AuditResult) -> Self {
        Self {
            scores: result.scores,
            score_total: result.score_total,
            statut: result.statut,
            points_vigilance: result.points_vigilance.clone(),
            recommandations: result.recommandations.clone(),
        }
    }
}

/// Derive a portfolio title from a consigne: trimmed, cut to `max_chars`
/// characters, with `...` appended when something was cut.
#[must_use]
pub fn make_title(consigne: &str, max_chars: usize) -> String {
    let trimmed = consigne.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut title: String = trimmed.chars().take(max_chars).collect();
    title.push_str("...");
    title
}
