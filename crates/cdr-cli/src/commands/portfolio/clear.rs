use anyhow::bail;
use cdr_store::PortfolioStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PortfolioClearArgs;
use crate::context::AppStore;
use crate::output::output;

#[derive(Serialize)]
struct ClearResponse {
    cleared: usize,
}

/// Handle `cdr portfolio clear --yes`.
pub fn handle(
    args: &PortfolioClearArgs,
    portfolio: &mut PortfolioStore<AppStore>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !args.yes {
        bail!(
            "refusing to delete {} portfolio entries without --yes",
            portfolio.len()
        );
    }
    let cleared = portfolio.len();
    portfolio.clear()?;
    output(&ClearResponse { cleared }, flags.format)
}
