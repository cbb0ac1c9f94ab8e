//! Credential resolution.
//!
//! A key may come from three places. The first non-blank one wins:
//! an explicit override (`--api-key`), the stored preference (`cdr key set`),
//! then the configured default (`analysis.api_key` / `COMPAGNON_ANALYSIS__API_KEY`).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Explicit,
    Stored,
    Config,
}

impl CredentialSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Stored => "stored",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub key: String,
    pub source: CredentialSource,
}

impl ResolvedCredential {
    /// Key with everything but the last four characters hidden.
    #[must_use]
    pub fn masked(&self) -> String {
        let count = self.key.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.key.chars().skip(count - 4).collect();
        format!("{}{tail}", "*".repeat(count - 4))
    }
}

/// Pick the credential with the highest precedence.
#[must_use]
pub fn resolve_credential(
    explicit: Option<&str>,
    stored: Option<&str>,
    default: Option<&str>,
) -> Option<ResolvedCredential> {
    [
        (explicit, CredentialSource::Explicit),
        (stored, CredentialSource::Stored),
        (default, CredentialSource::Config),
    ]
    .into_iter()
    .find_map(|(candidate, source)| {
        let key = candidate?.trim();
        (!key.is_empty()).then(|| ResolvedCredential {
            key: key.to_string(),
            source,
        })
    })
}

/// Same as [`resolve_credential`], keeping only the key.
#[must_use]
pub fn resolve_api_key(
    explicit: Option<&str>,
    stored: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    resolve_credential(explicit, stored, default).map(|c| c.key)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_beats_everything() {
        let resolved = resolve_credential(Some("flag"), Some("stored"), Some("config")).unwrap();
        assert_eq!(resolved.key, "flag");
        assert_eq!(resolved.source, CredentialSource::Explicit);
    }

    #[test]
    fn stored_beats_config() {
        let resolved = resolve_credential(None, Some("stored"), Some("config")).unwrap();
        assert_eq!(resolved.source, CredentialSource::Stored);
    }

    #[test]
    fn blank_values_are_skipped() {
        let resolved = resolve_credential(Some("  "), Some(""), Some(" config ")).unwrap();
        assert_eq!(resolved.key, "config");
        assert_eq!(resolved.source, CredentialSource::Config);
    }

    #[test]
    fn nothing_resolves_to_none() {
        assert_eq!(resolve_api_key(None, None, None), None);
        assert_eq!(resolve_api_key(Some(""), None, Some("\t")), None);
    }

    #[test]
    fn masking_keeps_last_four() {
        let resolved = ResolvedCredential {
            key: "AIzaSyABCDEF1234".into(),
            source: CredentialSource::Stored,
        };
        assert_eq!(resolved.masked(), "************1234");

        let short = ResolvedCredential {
            key: "abc".into(),
            source: CredentialSource::Stored,
        };
        assert_eq!(short.masked(), "***");
    }
}
