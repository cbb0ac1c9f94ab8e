use cdr_store::PortfolioStore;

use crate::cli::subcommands::PortfolioRadarArgs;
use crate::commands::shared::result::write_radar;
use crate::context::AppStore;

/// Handle `cdr portfolio radar <id>`.
pub fn handle(args: &PortfolioRadarArgs, portfolio: &PortfolioStore<AppStore>) -> anyhow::Result<()> {
    let result = super::find(portfolio, &args.id)?;
    write_radar(result, args.output.as_deref())?;
    if let Some(path) = &args.output {
        tracing::info!(path = %path, id = %result.id, "radar chart written");
    }
    Ok(())
}
