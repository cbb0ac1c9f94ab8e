//! Entity structs for Compagnon de route.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! persisted portfolio can be round-tripped and validated against its schema.

mod audit_result;
mod context;

pub use audit_result::{AuditResult, ExportView, Recommendation, SubScores, make_title};
pub use context::ContextAnswers;
