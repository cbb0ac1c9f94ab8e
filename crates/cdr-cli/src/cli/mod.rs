use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cdr` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cdr",
    version,
    about = "Compagnon de route - audit de vulnérabilité des évaluations face à l'IA"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API key for this invocation only (takes precedence over the stored key)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Directory holding the portfolio and preferences
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub ephemeral: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            api_key: self.api_key.clone(),
            data_dir: self.data_dir.clone(),
            ephemeral: self.ephemeral,
        }
    }
}
