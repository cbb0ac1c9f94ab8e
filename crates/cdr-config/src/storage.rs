//! Local storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the key-value files. Empty means the platform data
    /// directory (`~/.local/share/compagnon` on Linux).
    #[serde(default)]
    pub data_dir: String,
}

impl StorageConfig {
    /// Directory to use for persisted state.
    ///
    /// Falls back to `./.compagnon` when the platform has no data directory.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        if !self.data_dir.trim().is_empty() {
            return PathBuf::from(self.data_dir.trim());
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from(".compagnon"),
            |dir| dir.join("compagnon"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            data_dir: "/tmp/cdr-data".into(),
        };
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/tmp/cdr-data"));
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        let config = StorageConfig::default();
        let dir = config.resolved_data_dir();
        assert!(dir.ends_with("compagnon") || dir.ends_with(".compagnon"));
    }
}
