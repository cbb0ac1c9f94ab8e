use cdr_store::PortfolioStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::result::show_result;
use crate::context::AppStore;

/// Handle `cdr portfolio show <id>`.
pub fn handle(
    id: &str,
    portfolio: &PortfolioStore<AppStore>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    show_result(super::find(portfolio, id)?, flags)
}
