//! # cdr-store
//!
//! Local persistence for Compagnon de route: a small key-value abstraction
//! with file and in-memory backends, the portfolio of saved results, and
//! stored preferences.

mod error;
pub mod kv;
pub mod portfolio;
pub mod preferences;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use portfolio::{PORTFOLIO_KEY, PortfolioStore};
pub use preferences::{API_KEY_KEY, Preferences};
