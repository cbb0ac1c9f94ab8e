//! ID prefixes and generation helpers.
//!
//! IDs are opaque to every consumer; the prefix only tells a human reading the
//! portfolio file where an entry came from.

use chrono::{DateTime, Utc};

use crate::errors::CoreError;

/// Prefix for detailed (AI-backed) audits.
pub const PREFIX_AUDIT: &str = "aud";

/// Prefix for quick-test results.
pub const PREFIX_QUICK_TEST: &str = "qt";

/// Generate a detailed-audit ID: `aud-` followed by 8 random hex characters.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn new_audit_id() -> Result<String, CoreError> {
    let mut bytes = [0_u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("random source unavailable: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{PREFIX_AUDIT}-{hex}"))
}

/// Generate a quick-test ID from the creation time: `qt-<unix millis>`.
#[must_use]
pub fn quick_test_id(now: DateTime<Utc>) -> String {
    format!("{PREFIX_QUICK_TEST}-{}", now.timestamp_millis())
}
