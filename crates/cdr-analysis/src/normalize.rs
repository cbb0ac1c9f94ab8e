//! Normalize-or-default: turn whatever the model answered into well-formed
//! analysis fields.
//!
//! | field              | absent / wrong type | present                                   |
//! |--------------------|---------------------|-------------------------------------------|
//! | 4 sub-scores       | 0                   | numbers or numeric strings, rounded, clamped to 0–3 |
//! | `score_total`      | recomputed          | replaced by the sum; mismatch logged      |
//! | `statut`           | derived             | replaced by the band of the sum; mismatch logged |
//! | `points_vigilance` | `[]`                | non-string items dropped                  |
//! | `recommandations`  | `[]`                | items without an `action` dropped; missing `fiche` is `""` |
//! | `justifications`   | `{}`                | non-string values dropped                 |

use std::collections::BTreeMap;

use cdr_core::entities::{Recommendation, SubScores};
use cdr_core::enums::{Dimension, MAX_SUB_SCORE, VulnerabilityStatus};
use serde_json::{Map, Value};

use crate::error::AnalysisError;

/// The analysis fields of an audit, every invariant holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAnalysis {
    pub scores: SubScores,
    pub points_vigilance: Vec<String>,
    pub recommandations: Vec<Recommendation>,
    pub justifications: BTreeMap<String, String>,
}

impl NormalizedAnalysis {
    #[must_use]
    pub fn score_total(&self) -> u8 {
        self.scores.total()
    }

    #[must_use]
    pub fn statut(&self) -> VulnerabilityStatus {
        VulnerabilityStatus::from_total(self.score_total())
    }
}

/// Normalize a raw model answer. Only a non-object answer is an error.
pub fn normalize_response(value: &Value) -> Result<NormalizedAnalysis, AnalysisError> {
    let Some(object) = value.as_object() else {
        return Err(AnalysisError::InvalidPayload(format!(
            "objet JSON attendu, reçu {}",
            json_type(value)
        )));
    };

    let mut scores = SubScores::default();
    for dimension in Dimension::ALL {
        scores.set(dimension, sub_score(object, dimension));
    }
    let total = scores.total();
    let statut = VulnerabilityStatus::from_total(total);

    if let Some(claimed) = object.get("score_total").and_then(coerce_number) {
        if claimed != f64::from(total) {
            tracing::warn!(claimed, total, "model score_total disagrees with the sub-scores; using the sum");
        }
    }
    if let Some(claimed) = object.get("statut").and_then(Value::as_str) {
        match claimed.parse::<VulnerabilityStatus>() {
            Ok(parsed) if parsed == statut => {}
            _ => tracing::warn!(claimed, derived = %statut, "model statut disagrees with the total; using the derived band"),
        }
    }

    Ok(NormalizedAnalysis {
        scores,
        points_vigilance: string_list(object.get("points_vigilance")),
        recommandations: recommendations(object.get("recommandations")),
        justifications: string_map(object.get("justifications")),
    })
}

// The value is clamped to 0..=3 before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sub_score(object: &Map<String, Value>, dimension: Dimension) -> u8 {
    let Some(raw) = object.get(dimension.as_str()) else {
        tracing::warn!(dimension = dimension.as_str(), "sub-score missing; defaulting to 0");
        return 0;
    };
    let Some(number) = coerce_number(raw) else {
        tracing::warn!(dimension = dimension.as_str(), %raw, "sub-score is not a number; defaulting to 0");
        return 0;
    };

    let max = f64::from(MAX_SUB_SCORE);
    if !(0.0..=max).contains(&number) {
        tracing::warn!(dimension = dimension.as_str(), number, "sub-score out of range; clamped");
    }
    let clamped = number.round().clamp(0.0, max);
    clamped as u8
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn recommendations(value: Option<&Value>) -> Vec<Recommendation> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let action = item.get("action")?.as_str()?.trim();
                    if action.is_empty() {
                        return None;
                    }
                    let fiche = item
                        .get("fiche")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    Some(Recommendation {
                        action: action.to_string(),
                        fiche: fiche.trim().to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booléen",
        Value::Number(_) => "un nombre",
        Value::String(_) => "une chaîne",
        Value::Array(_) => "un tableau",
        Value::Object(_) => "un objet",
    }
}
