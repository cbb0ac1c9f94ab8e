//! # cdr-analysis
//!
//! The audit client: sends a consigne and its context to a language-model
//! backend and turns the answer into an [`cdr_core::entities::AuditResult`].
//!
//! Two backends are provided:
//! - [`GeminiBackend`]: direct `generateContent` calls with an API key
//! - [`ProxyBackend`]: a service exposing `POST /api/audit`
//!
//! Whatever the backend returns goes through [`normalize::normalize_response`],
//! so scores are always in range and the total and status always agree.

mod backend;
mod client;
mod error;
mod gemini;
mod http;
pub mod normalize;
pub mod prompt;
mod proxy;
mod request;

pub use backend::{AnalysisBackend, ConfiguredBackend};
pub use client::{AuditClient, DEFAULT_TITLE_MAX_CHARS};
pub use error::{AnalysisError, ErrorKind, RejectionReason};
pub use gemini::{GeminiBackend, extract_candidate_json};
pub use http::{classify_failure, parse_model_json, strip_fences};
pub use proxy::ProxyBackend;
pub use request::AnalysisRequest;
