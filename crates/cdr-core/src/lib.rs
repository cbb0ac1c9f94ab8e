//! # cdr-core
//!
//! Core types and pure logic for Compagnon de route.
//!
//! This crate provides the foundational pieces shared across all `cdr` crates:
//! - Entity structs for audit results and their context answers
//! - The vulnerability status enum and its score banding
//! - Dimensions, answer weights, and context question option sets
//! - ID generation helpers
//! - Radar chart geometry (and SVG rendering of it)
//! - The quick-test engine (8 fixed questions, normalized robustness)
//! - The static remediation sheet catalogue
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod fiches;
pub mod ids;
pub mod radar;
