use cdr_core::entities::ContextAnswers;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Payload sent to an analysis backend. Serializes to the `/api/audit`
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub consigne: String,
    #[serde(rename = "contextAnswers")]
    pub context_answers: ContextAnswers,
}

impl AnalysisRequest {
    /// Build a request, checking that the consigne is not blank and that
    /// every context question has an answer. The text is kept as typed; the
    /// prompt and the title trim it themselves.
    pub fn new(consigne: &str, context: &ContextAnswers) -> Result<Self, AnalysisError> {
        if consigne.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("la consigne est vide".into()));
        }
        let missing = context.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|q| q.as_str()).collect();
            return Err(AnalysisError::InvalidInput(format!(
                "questions de contexte sans réponse : {}",
                names.join(", ")
            )));
        }
        Ok(Self {
            consigne: consigne.to_string(),
            context_answers: context.clone(),
        })
    }
}
