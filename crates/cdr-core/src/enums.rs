//! Status enums, dimensions, and answer scales for Compagnon de route.
//!
//! `VulnerabilityStatus` serializes with its French display label (the format
//! the portfolio has always been persisted in). The other enums use
//! `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Highest possible robustness total (4 dimensions × 3).
pub const MAX_TOTAL: u8 = 12;

/// Highest possible score on a single dimension.
pub const MAX_SUB_SCORE: u8 = 3;

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// One of the four rated dimensions of an assessment.
///
/// Declaration order is the radar axis order (top, right, bottom, left).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Reproductibilite,
    Contextualisation,
    Tacitite,
    Multimodalite,
}

impl Dimension {
    /// All dimensions in axis order.
    pub const ALL: [Self; 4] = [
        Self::Reproductibilite,
        Self::Contextualisation,
        Self::Tacitite,
        Self::Multimodalite,
    ];

    /// Wire key, as used in analysis responses and justification maps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reproductibilite => "reproductibilite",
            Self::Contextualisation => "contextualisation",
            Self::Tacitite => "tacitite",
            Self::Multimodalite => "multimodalite",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reproductibilite => "Reproductibilité",
            Self::Contextualisation => "Contextualisation",
            Self::Tacitite => "Tacitité",
            Self::Multimodalite => "Multimodalité",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VulnerabilityStatus
// ---------------------------------------------------------------------------

/// Robustness band of an assessment, derived from its 0–12 total.
///
/// ```text
///  0–3   critique
///  4–6   élevée
///  7–9   modérée
/// 10–12  robuste
/// ```
///
/// The same four-tier table applies to detailed audits and to quick tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum VulnerabilityStatus {
    #[serde(rename = "Vulnérabilité critique", alias = "VULNÉRABILITÉ CRITIQUE")]
    Critique,
    #[serde(rename = "Vulnérabilité élevée", alias = "VULNÉRABILITÉ ÉLEVÉE")]
    Elevee,
    #[serde(rename = "Vulnérabilité modérée", alias = "VULNÉRABILITÉ MODÉRÉE")]
    Moderee,
    #[serde(rename = "Robuste", alias = "ROBUSTE")]
    Robuste,
}

impl VulnerabilityStatus {
    /// All statuses from most to least vulnerable.
    pub const ALL: [Self; 4] = [Self::Critique, Self::Elevee, Self::Moderee, Self::Robuste];

    /// Map a robustness total to its band.
    ///
    /// Totals above [`MAX_TOTAL`] are a caller bug; they saturate into the
    /// top band in release builds.
    #[must_use]
    pub fn from_total(total: u8) -> Self {
        debug_assert!(total <= MAX_TOTAL, "robustness total {total} exceeds {MAX_TOTAL}");
        match total {
            0..=3 => Self::Critique,
            4..=6 => Self::Elevee,
            7..=9 => Self::Moderee,
            _ => Self::Robuste,
        }
    }

    /// Inclusive range of totals that map to this status.
    #[must_use]
    pub const fn band(self) -> RangeInclusive<u8> {
        match self {
            Self::Critique => 0..=3,
            Self::Elevee => 4..=6,
            Self::Moderee => 7..=9,
            Self::Robuste => 10..=MAX_TOTAL,
        }
    }

    /// Display label (also the serialized form).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critique => "Vulnérabilité critique",
            Self::Elevee => "Vulnérabilité élevée",
            Self::Moderee => "Vulnérabilité modérée",
            Self::Robuste => "Robuste",
        }
    }

    /// Short advice shown next to the status.
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Critique => {
                "Évaluation très exposée : une IA générative peut produire un rendu recevable. \
                 Repensez le format (voir les fiches de remédiation)."
            }
            Self::Elevee => {
                "Évaluation fortement exposée : introduisez une composante orale, des données \
                 locales ou un suivi documenté du processus."
            }
            Self::Moderee => {
                "Quelques points de vigilance : renforcez l'ancrage local ou la justification \
                 orale des choix."
            }
            Self::Robuste => {
                "Évaluation robuste : maintenez la composante synchrone et la trace du processus."
            }
        }
    }
}

impl fmt::Display for VulnerabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VulnerabilityStatus {
    type Err = CoreError;

    /// Accepts the display label, the upper-case label, or the bare band name,
    /// with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'é' | 'è' | 'ê' => 'e',
                other => other,
            })
            .collect();
        let band = folded
            .strip_prefix("vulnerabilite")
            .map_or(folded.as_str(), str::trim_start);

        match band {
            "critique" => Ok(Self::Critique),
            "elevee" => Ok(Self::Elevee),
            "moderee" => Ok(Self::Moderee),
            "robuste" => Ok(Self::Robuste),
            _ => Err(CoreError::Validation(format!(
                "unknown vulnerability status '{s}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// AnswerWeight
// ---------------------------------------------------------------------------

/// Answer to a quick-test question. The weight is the vulnerability it adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerWeight {
    No,
    Partially,
    Yes,
}

impl AnswerWeight {
    /// Answers in the order the original form offered them.
    pub const ALL: [Self; 3] = [Self::Yes, Self::Partially, Self::No];

    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Partially => 1,
            Self::Yes => 2,
        }
    }

    #[must_use]
    pub const fn from_weight(weight: u8) -> Option<Self> {
        match weight {
            0 => Some(Self::No),
            1 => Some(Self::Partially),
            2 => Some(Self::Yes),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::No => "Non",
            Self::Partially => "Partiellement",
            Self::Yes => "Oui",
        }
    }
}

impl fmt::Display for AnswerWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ContextQuestion
// ---------------------------------------------------------------------------

/// One of the three contextual questions asked before a detailed audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContextQuestion {
    Synchrone,
    Donnees,
    Processus,
}

impl ContextQuestion {
    pub const ALL: [Self; 3] = [Self::Synchrone, Self::Donnees, Self::Processus];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synchrone => "synchrone",
            Self::Donnees => "donnees",
            Self::Processus => "processus",
        }
    }

    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Synchrone => "Composante orale ou synchrone ?",
            Self::Donnees => "Données locales ou confidentielles ?",
            Self::Processus => "Processus de production évalué ?",
        }
    }

    /// Fixed option set offered for this question.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Synchrone => &[
                "Oui obligatoire",
                "Oui optionnelle",
                "Non, entièrement asynchrone",
            ],
            Self::Donnees => &[
                "Oui exclusivement",
                "Partiellement",
                "Non, données génériques",
            ],
            Self::Processus => &[
                "Oui documenté ET évalué",
                "Demandé mais non évalué",
                "Non, seul le produit final",
            ],
        }
    }
}

impl fmt::Display for ContextQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
