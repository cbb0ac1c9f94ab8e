//! The user's saved results, newest first.

use cdr_core::entities::AuditResult;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Storage key of the serialized portfolio.
pub const PORTFOLIO_KEY: &str = "compagnon.portfolio";

/// In-memory portfolio mirrored to a [`KeyValueStore`].
///
/// Every mutation rewrites the whole list. Unreadable stored data is treated
/// as an empty portfolio.
#[derive(Debug)]
pub struct PortfolioStore<S> {
    store: S,
    entries: Vec<AuditResult>,
}

impl<S: KeyValueStore> PortfolioStore<S> {
    /// Read the portfolio from `store`. Never fails.
    pub fn load(store: S) -> Self {
        let entries = match store.get(PORTFOLIO_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<AuditResult>>(&raw) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!(%error, "stored portfolio is unreadable; starting empty");
                    Vec::new()
                }
            },
            Err(error) => {
                tracing::warn!(%error, "failed to read stored portfolio; starting empty");
                Vec::new()
            }
        };

        let inconsistent = entries.iter().filter(|e| !e.is_consistent()).count();
        if inconsistent > 0 {
            tracing::warn!(inconsistent, "portfolio holds entries whose total or status disagree with their scores");
        }
        tracing::debug!(count = entries.len(), "portfolio loaded");

        Self { store, entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[AuditResult] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AuditResult> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `result` at the front and persist. On a failed write the
    /// in-memory list is left as it was.
    pub fn append(&mut self, result: AuditResult) -> Result<(), StoreError> {
        tracing::info!(id = %result.id, total = result.score_total, "adding result to portfolio");
        self.entries.insert(0, result);
        if let Err(error) = self.persist() {
            self.entries.remove(0);
            return Err(error);
        }
        Ok(())
    }

    /// Remove the first entry with `id`. Returns `false` (and writes nothing)
    /// when there is none. The entry is kept if the write fails.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let removed = self.entries.remove(index);
        if let Err(error) = self.persist() {
            self.entries.insert(index, removed);
            return Err(error);
        }
        tracing::info!(id, "removed result from portfolio");
        Ok(true)
    }

    /// Drop every entry. Asking for confirmation is up to the caller.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        tracing::info!(count = self.entries.len(), "clearing portfolio");
        let previous = std::mem::take(&mut self.entries);
        if let Err(error) = self.persist() {
            self.entries = previous;
            return Err(error);
        }
        Ok(())
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        self.store.set(PORTFOLIO_KEY, &raw)
    }
}
