use clap::{Args, Subcommand};

/// API key commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KeyCommands {
    /// Store an API key for later runs.
    Set(KeySetArgs),
    /// Forget the stored API key.
    Clear,
    /// Show which key would be used and where it comes from.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct KeySetArgs {
    pub key: String,
}
