//! Prompt text and structured-output schema for the language model.

use std::fmt::Write as _;

use cdr_core::enums::VulnerabilityStatus;
use cdr_core::fiches::FICHES;
use serde_json::{Value, json};

use crate::request::AnalysisRequest;

pub const SYSTEM_PROMPT: &str = "\
Tu es l'expert·e en pédagogie « Compagnon de route », spécialisé·e dans l'audit des \
évaluations face à l'IA générative. Tu analyses des consignes d'examen, d'exercice ou de \
dispositif évaluatif pour mesurer leur substituabilité cognitive, en t'appuyant sur la doctrine \
de l'ouvrage « Évaluer en formation à l'ère de l'IA générative » (Rochane Kherbouche, 2026).

DIMENSIONS (chacune notée de 0 à 3, 3 étant le plus robuste) :
1. Reproductibilité : capacité de l'IA à produire un résultat recevable à partir de la consigne brute (0 = IA parfaite, 3 = IA incapable).
2. Contextualisation : ancrage dans des données locales, personnelles ou non documentées en ligne (0 = générique, 3 = ultra-spécifique).
3. Tacitité : dimensions métacognitives ou justification orale des choix (0 = produit pur, 3 = réflexivité forte).
4. Multimodalité : diversité des supports et composante synchrone ou physique (0 = texte asynchrone, 3 = présence physique ou synchrone).

RÈGLES DE RÉDACTION :
- Utilise l'écriture inclusive (point médian : apprenant·e, formateur·rice).
- Seule la première lettre du premier mot et les noms propres portent une majuscule.
- Sois rigoureux·se et n'hésite pas à pointer les vulnérabilités réelles.
- Chaque recommandation renvoie à une fiche de remédiation par son nom exact.
";

/// User prompt for one analysis, including the scoring instructions.
#[must_use]
pub fn user_prompt(request: &AnalysisRequest) -> String {
    let context = &request.context_answers;
    let mut prompt = format!(
        "ANALYSE REQUISE POUR LA CONSIGNE :\n\"{}\"\n\n\
         CONTEXTE DE L'ÉVALUATION :\n\
         - Modalité : {}\n\
         - Données : {}\n\
         - Processus : {}\n\n\
         INSTRUCTIONS DE CALCUL :\n\
         1. Attribue un score de 0 à 3 pour chaque dimension (Reproductibilité, Contextualisation, Tacitité, Multimodalité).\n\
         2. Le score_total DOIT être la somme exacte de ces 4 notes (0 à 12).\n\
         3. Détermine le statut selon le score_total :\n",
        request.consigne.trim(),
        context.synchrone,
        context.donnees,
        context.processus,
    );

    for status in VulnerabilityStatus::ALL.iter().rev() {
        let band = status.band();
        let _ = writeln!(
            prompt,
            "   - {}-{} : \"{}\"",
            band.start(),
            band.end(),
            status.label()
        );
    }

    prompt.push_str("\nFICHES DE REMÉDIATION DISPONIBLES (nom exact) :\n");
    for fiche in &FICHES {
        let _ = writeln!(prompt, "- {}", fiche.key);
    }
    prompt
}

/// Response schema in the Generative Language API dialect.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "reproductibilite": { "type": "INTEGER" },
            "contextualisation": { "type": "INTEGER" },
            "tacitite": { "type": "INTEGER" },
            "multimodalite": { "type": "INTEGER" },
            "score_total": { "type": "INTEGER" },
            "statut": { "type": "STRING" },
            "points_vigilance": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "recommandations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "action": { "type": "STRING" },
                        "fiche": { "type": "STRING" }
                    },
                    "required": ["action", "fiche"]
                }
            },
            "justifications": {
                "type": "OBJECT",
                "properties": {
                    "reproductibilite": { "type": "STRING" },
                    "contextualisation": { "type": "STRING" },
                    "tacitite": { "type": "STRING" },
                    "multimodalite": { "type": "STRING" }
                }
            }
        },
        "required": [
            "reproductibilite", "contextualisation", "tacitite", "multimodalite",
            "score_total", "statut", "points_vigilance", "recommandations"
        ]
    })
}

#[cfg(test)]
mod tests {
    use cdr_core::entities::ContextAnswers;

    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            consigne: "  Rédigez un rapport de 5 pages  ".into(),
            context_answers: ContextAnswers {
                synchrone: "Non, entièrement asynchrone".into(),
                donnees: "Non, données génériques".into(),
                processus: "Non, seul le produit final".into(),
            },
        }
    }

    #[test]
    fn prompt_embeds_consigne_and_context() {
        let prompt = user_prompt(&request());
        assert!(prompt.contains("\"Rédigez un rapport de 5 pages\""));
        assert!(prompt.contains("- Modalité : Non, entièrement asynchrone"));
        assert!(prompt.contains("- Processus : Non, seul le produit final"));
    }

    #[test]
    fn prompt_bands_match_score_mapper() {
        let prompt = user_prompt(&request());
        assert!(prompt.contains("0-3 : \"Vulnérabilité critique\""));
        assert!(prompt.contains("4-6 : \"Vulnérabilité élevée\""));
        assert!(prompt.contains("7-9 : \"Vulnérabilité modérée\""));
        assert!(prompt.contains("10-12 : \"Robuste\""));
    }

    #[test]
    fn prompt_lists_every_fiche() {
        let prompt = user_prompt(&request());
        for fiche in &FICHES {
            assert!(prompt.contains(fiche.key));
        }
    }

    #[test]
    fn schema_requires_core_fields() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 8);
        assert!(schema["properties"]["justifications"].is_object());
    }
}
