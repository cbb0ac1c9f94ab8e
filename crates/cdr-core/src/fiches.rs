//! Static catalogue of remediation sheets ("fiches").
//!
//! Recommendations reference a sheet by its exact `key`. An unknown key is not
//! an error: the recommendation is simply shown without enrichment.

use serde::Serialize;

/// A remediation sheet describing an alternative assessment format.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Fiche {
    pub id: u8,
    /// Exact name used by recommendations.
    pub key: &'static str,
    pub name: &'static str,
    pub format: &'static str,
    pub duree: &'static str,
    pub vulnerabilite: &'static str,
    pub publics: &'static str,
    pub principe: &'static str,
    pub adaptations: &'static [&'static str],
    pub charge: &'static str,
}

/// All sheets, ordered by id.
pub static FICHES: [Fiche; 8] = [
    Fiche {
        id: 1,
        key: "Fiche 1 — Projet de recherche appliquée",
        name: "Projet de recherche appliquée",
        format: "Projet individuel ou binôme, livrable écrit + soutenance",
        duree: "12-16 semaines",
        vulnerabilite: "5/5",
        publics: "BTS, Licence Pro, M1-M2",
        principe: "Identifier une problématique terrain, collecte de données et analyse.",
        adaptations: &["Jalons intermédiaires", "Journal de bord", "Soutenance finale"],
        charge: "20-25h pour 30 apprenant·es",
    },
    Fiche {
        id: 2,
        key: "Fiche 2 — Étude de cas complexe",
        name: "Étude de cas complexe",
        format: "Analyse individuelle ou groupe, livrable écrit + restitution",
        duree: "1-4 semaines",
        vulnerabilite: "4/5",
        publics: "Tous niveaux",
        principe: "Analyse d'un cas professionnel réel avec données spécifiques.",
        adaptations: &["Contexte local", "Variable imprévisible", "Clarification orale"],
        charge: "8-12h pour 30 apprenant·es",
    },
    Fiche {
        id: 3,
        key: "Fiche 3 — Production multimodale",
        name: "Production multimodale",
        format: "Vidéo, podcast, infographie avec présence physique",
        duree: "2-6 semaines",
        vulnerabilite: "3/5",
        publics: "Communication, marketing, management",
        principe: "Combinaison de formats avec présence de l'apprenant·e.",
        adaptations: &["3 min présence écran", "Lieu lié au projet", "Objet personnel"],
        charge: "10-15h pour 30 apprenant·es",
    },
    Fiche {
        id: 4,
        key: "Fiche 4 — Portfolio réflexif avec processus documenté",
        name: "Portfolio réflexif",
        format: "Dossier évolutif, traces documentées + réflexion",
        duree: "6-16 semaines",
        vulnerabilite: "2/5",
        publics: "Master, licences pro, alternance",
        principe: "Documenter le processus avec versions successives et traces IA.",
        adaptations: &["Section Produit", "Section Processus", "Section Propos"],
        charge: "20-25h pour 30 apprenant·es",
    },
    Fiche {
        id: 5,
        key: "Fiche 5 — Soutenance orale sans écrit préalable",
        name: "Soutenance orale",
        format: "Examen oral individuel, sans document",
        duree: "10-30 minutes",
        vulnerabilite: "1/5",
        publics: "Tous niveaux",
        principe: "Défense de travaux ou questions sur programme en direct.",
        adaptations: &["Viva voce", "Entretien de compétences"],
        charge: "5h pour 30 apprenant·es",
    },
    Fiche {
        id: 6,
        key: "Fiche 6 — Simulation professionnelle filmée",
        name: "Simulation professionnelle filmée",
        format: "Mise en situation reconstituée, filmée",
        duree: "15-30 min + débriefing",
        vulnerabilite: "1/5",
        publics: "RH, santé, commerce, management",
        principe: "Situation professionnelle avec élément imprévu le jour J.",
        adaptations: &["Élément imprévu", "Débriefing immédiat", "Auto-analyse"],
        charge: "12-15h pour 30 apprenant·es",
    },
    Fiche {
        id: 7,
        key: "Fiche 7 — Évaluation par les pairs structurée",
        name: "Évaluation par les pairs",
        format: "Évaluation croisée critériée avec calibration",
        duree: "3 séances",
        vulnerabilite: "2/5",
        publics: "Tous niveaux",
        principe: "Évaluer 3 productions anonymes selon une grille explicite.",
        adaptations: &["Séance calibration", "Note feedbacks", "Débriefing formateur·rice"],
        charge: "6-8h pour 30 apprenant·es",
    },
    Fiche {
        id: 8,
        key: "Fiche 8 — Auto-évaluation justifiée",
        name: "Auto-évaluation justifiée",
        format: "Auto-notation critériée avec justification",
        duree: "2-3h + entretien",
        vulnerabilite: "2/5",
        publics: "Apprenant·es avancé·es",
        principe: "S'attribuer un score avec renvois précis au travail.",
        adaptations: &["Entretien confrontation", "Justification écrite"],
        charge: "8-10h pour 30 apprenant·es",
    },
];

/// Key of the sheet recommended after a quick test.
pub const ORAL_DEFENSE_KEY: &str = "Fiche 5 — Soutenance orale sans écrit préalable";

/// Look up a sheet by exact key.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static Fiche> {
    FICHES.iter().find(|fiche| fiche.key == key)
}

#[must_use]
pub fn by_id(id: u8) -> Option<&'static Fiche> {
    FICHES.iter().find(|fiche| fiche.id == id)
}
