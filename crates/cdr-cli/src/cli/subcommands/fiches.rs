use clap::{Args, Subcommand};

/// Remediation sheet commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FichesCommands {
    /// List all sheets.
    List,
    /// Show one sheet by number, exact key or part of its name.
    Show(FichesShowArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FichesShowArgs {
    pub query: String,
}
