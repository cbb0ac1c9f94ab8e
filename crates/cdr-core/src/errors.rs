//! Cross-cutting error types for Compagnon de route.
//!
//! Domain-specific errors (`AnalysisError`, `StoreError`, ...) are defined in
//! their respective crates. `cdr-cli` converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any `cdr` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (range, completeness, format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
