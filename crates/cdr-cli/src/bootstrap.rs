use anyhow::Context;
use cdr_config::CdrConfig;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered configuration, then apply command-line
/// overrides that live in the config tree.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CdrConfig> {
    let mut config = CdrConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(dir) = &flags.data_dir {
        config.storage.data_dir.clone_from(dir);
    }
    Ok(config)
}
