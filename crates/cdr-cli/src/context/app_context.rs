use anyhow::Context;
use cdr_analysis::{AuditClient, ConfiguredBackend};
use cdr_config::{CdrConfig, ResolvedCredential, resolve_credential};
use cdr_store::{FileStore, MemoryStore, PortfolioStore, Preferences};
use cdr_wizard::WizardController;

use crate::cli::GlobalFlags;
use crate::context::AppStore;

pub type Controller = WizardController<ConfiguredBackend, AppStore>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: CdrConfig,
    pub store: AppStore,
    /// `--api-key`, highest credential precedence.
    explicit_key: Option<String>,
}

impl AppContext {
    pub fn init(config: CdrConfig, flags: &GlobalFlags) -> Self {
        let store = if flags.ephemeral {
            AppStore::Memory(MemoryStore::new())
        } else {
            AppStore::File(FileStore::new(config.storage.resolved_data_dir()))
        };
        tracing::debug!(store = %store.location(), backend = %config.analysis.backend, "context ready");

        Self {
            config,
            store,
            explicit_key: flags.api_key.clone(),
        }
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences<AppStore> {
        Preferences::new(self.store.clone())
    }

    #[must_use]
    pub fn portfolio(&self) -> PortfolioStore<AppStore> {
        PortfolioStore::load(self.store.clone())
    }

    /// Key that the next analysis would use: `--api-key`, then the stored
    /// key, then `analysis.api_key`.
    pub fn credential(&self) -> anyhow::Result<Option<ResolvedCredential>> {
        let stored = self
            .preferences()
            .api_key()
            .context("failed to read the stored API key")?;
        Ok(resolve_credential(
            self.explicit_key.as_deref(),
            stored.as_deref(),
            Some(self.config.analysis.api_key.as_str()),
        ))
    }

    /// Client for the configured backend, using the resolved credential.
    pub fn audit_client(&self) -> anyhow::Result<AuditClient<ConfiguredBackend>> {
        let key = self.credential()?.map(|credential| credential.key);
        self.audit_client_with_key(key)
    }

    pub fn audit_client_with_key(
        &self,
        api_key: Option<String>,
    ) -> anyhow::Result<AuditClient<ConfiguredBackend>> {
        let backend = ConfiguredBackend::from_config(&self.config.analysis, api_key)
            .context("failed to build the analysis backend")?;
        Ok(AuditClient::new(backend).with_title_max_chars(self.config.general.title_max_chars))
    }

    pub fn controller(&self) -> anyhow::Result<Controller> {
        Ok(WizardController::new(self.audit_client()?, self.portfolio()))
    }

    /// Replace the explicit key for the rest of the process.
    pub fn override_key(&mut self, key: String) {
        self.explicit_key = Some(key);
    }
}
