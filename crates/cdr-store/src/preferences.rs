//! Stored user preferences.

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Storage key of the user-supplied API key.
pub const API_KEY_KEY: &str = "compagnon.api_key";

#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored key, or `None` when absent or blank.
    pub fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get(API_KEY_KEY)?
            .map(|raw| raw.trim().to_string())
            .filter(|key| !key.is_empty()))
    }

    pub fn set_api_key(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.set(API_KEY_KEY, key.trim())?;
        tracing::info!("stored API key");
        Ok(())
    }

    pub fn clear_api_key(&mut self) -> Result<(), StoreError> {
        self.store.remove(API_KEY_KEY)?;
        tracing::info!("cleared stored API key");
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
