use cdr_core::entities::ExportView;
use cdr_store::PortfolioStore;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppStore;
use crate::output::output;

/// Handle `cdr portfolio export <id>`: the JSON offered for copy, pretty
/// unless `--format raw`.
pub fn handle(
    id: &str,
    portfolio: &PortfolioStore<AppStore>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let view = ExportView::from(super::find(portfolio, id)?);
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&view, format)
}
