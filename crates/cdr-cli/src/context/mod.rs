mod app_context;
mod config_warnings;
mod store;

pub use app_context::{AppContext, Controller};
pub use config_warnings::warn_unconfigured;
pub use store::AppStore;
