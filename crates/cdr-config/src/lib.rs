//! # cdr-config
//!
//! Layered configuration loading for Compagnon de route using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COMPAGNON_*` prefix, `__` as separator)
//! 2. Project-level `.compagnon/config.toml`
//! 3. User-level `~/.config/compagnon/config.toml`
//! 4. Built-in defaults
//!
//! `COMPAGNON_ANALYSIS__API_KEY` maps to `analysis.api_key`,
//! `COMPAGNON_STORAGE__DATA_DIR` to `storage.data_dir`, and so on.
//!
//! ```no_run
//! use cdr_config::CdrConfig;
//!
//! let config = CdrConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.analysis.backend);
//! ```

mod analysis;
mod credentials;
mod error;
mod general;
mod storage;

pub use analysis::{AnalysisConfig, BackendKind};
pub use credentials::{CredentialSource, ResolvedCredential, resolve_api_key, resolve_credential};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::StorageConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Prefix of every environment variable read by the configuration.
pub const ENV_PREFIX: &str = "COMPAGNON_";

/// Top-level sections, used to spot mistyped environment keys.
pub const SECTIONS: [&str; 3] = ["analysis", "storage", "general"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CdrConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CdrConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`CdrConfig::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading the nearest `.env` file.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".compagnon/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.general.title_max_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.title_max_chars".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("compagnon").join("config.toml"))
    }

    /// Walk up from `CARGO_MANIFEST_DIR` looking for a `.env`, then try the
    /// current directory. Silently does nothing if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CdrConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.analysis.has_api_key());
        assert_eq!(config.general.title_max_chars, 50);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = CdrConfig::default();
        config.analysis.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analysis.timeout_secs"));
    }
}
