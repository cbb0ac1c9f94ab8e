//! Analysis error types.
//!
//! Messages are shown to the user as-is, hence in French.

use thiserror::Error;

/// Coarse category of an analysis failure, used to decide what to tell the
/// user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable credential was configured.
    Credential,
    /// Network trouble or an unusable answer; trying again may work.
    Transient,
    /// The service refused the request.
    Rejected,
    /// The request itself was invalid and was never sent.
    Input,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credential => "credential",
            Self::Transient => "transient",
            Self::Rejected => "rejected",
            Self::Input => "input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the service refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidCredential,
    Quota,
    Safety,
    Other { status: u16 },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredential => f.write_str("clé API refusée"),
            Self::Quota => f.write_str("quota dépassé"),
            Self::Safety => f.write_str("contenu bloqué par les filtres de sécurité"),
            Self::Other { status } => write!(f, "erreur serveur ({status})"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(
        "Aucune clé API configurée. Enregistrez-en une avec `cdr key set <CLÉ>` \
         ou définissez COMPAGNON_ANALYSIS__API_KEY."
    )]
    MissingCredential,

    #[error("Le moteur d'IA n'a pas renvoyé de données.")]
    EmptyPayload,

    #[error("Le serveur a renvoyé une réponse invalide : {0}")]
    InvalidPayload(String),

    #[error("L'analyse a échoué. Veuillez vérifier votre connexion. ({0})")]
    Transport(reqwest::Error),

    #[error("Le serveur a mis trop de temps à répondre (Timeout). L'analyse est trop complexe.")]
    Timeout,

    #[error("Analyse refusée ({reason}) : {message}")]
    Rejected {
        reason: RejectionReason,
        message: String,
    },

    #[error("Requête incomplète : {0}")]
    InvalidInput(String),

    #[error("Erreur interne : {0}")]
    Internal(String),
}

impl AnalysisError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::Credential,
            Self::EmptyPayload
            | Self::InvalidPayload(_)
            | Self::Transport(_)
            | Self::Timeout
            | Self::Internal(_) => ErrorKind::Transient,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::InvalidInput(_) => ErrorKind::Input,
        }
    }

    /// Whether the user should be offered to enter another API key.
    #[must_use]
    pub const fn suggests_new_credential(&self) -> bool {
        matches!(
            self,
            Self::Rejected {
                reason: RejectionReason::InvalidCredential | RejectionReason::Quota,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error)
        }
    }
}

impl From<cdr_core::errors::CoreError> for AnalysisError {
    fn from(error: cdr_core::errors::CoreError) -> Self {
        Self::Internal(error.to_string())
    }
}
