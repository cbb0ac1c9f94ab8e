use clap::{Args, Subcommand};

/// Portfolio commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PortfolioCommands {
    /// List saved results, newest first.
    List,
    /// Show one saved result.
    Show(PortfolioEntryArgs),
    /// Print the exportable JSON of a result (scores, status, vigilance points, recommendations).
    Export(PortfolioEntryArgs),
    /// Render the radar chart of a result as SVG.
    Radar(PortfolioRadarArgs),
    /// Delete one saved result.
    Remove(PortfolioEntryArgs),
    /// Delete every saved result.
    Clear(PortfolioClearArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PortfolioEntryArgs {
    /// Result id (as printed by `cdr portfolio list`)
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct PortfolioRadarArgs {
    /// Result id
    pub id: String,
    /// Write the SVG to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PortfolioClearArgs {
    /// Confirm deletion of the whole portfolio
    #[arg(long)]
    pub yes: bool,
}
