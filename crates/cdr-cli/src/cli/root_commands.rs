use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{FichesCommands, KeyCommands, PortfolioCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Interactive wizard: detailed audit, quick test and portfolio.
    Wizard,
    /// Audit one assessment instruction and save the result.
    Audit(AuditArgs),
    /// Eight-question self-assessment, no network needed.
    QuickTest(QuickTestArgs),
    /// Saved results.
    Portfolio {
        #[command(subcommand)]
        action: PortfolioCommands,
    },
    /// Remediation sheets catalogue.
    Fiches {
        #[command(subcommand)]
        action: FichesCommands,
    },
    /// Stored API key.
    Key {
        #[command(subcommand)]
        action: KeyCommands,
    },
    /// Print the JSON schema of a persisted type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Assessment instruction text, or @path to read it from a file
    #[arg(long)]
    pub consigne: String,
    /// Oral or synchronous component: option number (1-3) or free text
    #[arg(long)]
    pub synchrone: String,
    /// Local or confidential data: option number (1-3) or free text
    #[arg(long)]
    pub donnees: String,
    /// Production process assessed: option number (1-3) or free text
    #[arg(long)]
    pub processus: String,
}

#[derive(Clone, Debug, Args)]
pub struct QuickTestArgs {
    /// Comma-separated answers in question order (oui/partiellement/non or 2/1/0).
    /// Prompts interactively when absent.
    #[arg(long)]
    pub answers: Option<String>,
}

/// Persisted types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    AuditResult,
    ExportView,
    ContextAnswers,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type to describe
    #[arg(value_enum, default_value = "audit-result")]
    pub type_name: SchemaType,
}
