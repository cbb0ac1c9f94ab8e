//! Messages rotated while an audit is in flight. Purely cosmetic.

pub const PROGRESS_MESSAGES: [&str; 5] = [
    "Lecture de la consigne...",
    "Analyse de la reproductibilité par une IA...",
    "Évaluation de l'ancrage contextuel...",
    "Recherche des dimensions tacites et multimodales...",
    "Rédaction des recommandations...",
];

/// Message for the `tick`-th refresh.
#[must_use]
pub const fn progress_message(tick: usize) -> &'static str {
    PROGRESS_MESSAGES[tick % PROGRESS_MESSAGES.len()]
}
