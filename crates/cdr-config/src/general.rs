//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default length of a portfolio title derived from a consigne.
const fn default_title_max_chars() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum number of characters kept from the consigne for a result title.
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title_max_chars: default_title_max_chars(),
        }
    }
}
