use anyhow::bail;
use cdr_store::PortfolioStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppStore;
use crate::output::output;

#[derive(Serialize)]
struct RemoveResponse<'a> {
    removed: &'a str,
    remaining: usize,
}

/// Handle `cdr portfolio remove <id>`.
pub fn handle(
    id: &str,
    portfolio: &mut PortfolioStore<AppStore>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !portfolio.remove(id)? {
        bail!("no portfolio entry with id '{id}' (see `cdr portfolio list`)");
    }
    output(
        &RemoveResponse {
            removed: id,
            remaining: portfolio.len(),
        },
        flags.format,
    )
}
