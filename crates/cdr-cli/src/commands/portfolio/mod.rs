mod clear;
mod export;
mod list;
mod radar;
mod remove;
mod show;

use anyhow::anyhow;
use cdr_core::entities::AuditResult;
use cdr_store::PortfolioStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PortfolioCommands;
use crate::context::{AppContext, AppStore};

/// Handle `cdr portfolio <subcommand>`.
pub fn handle(
    action: &PortfolioCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut portfolio = ctx.portfolio();
    match action {
        PortfolioCommands::List => list::handle(&portfolio, flags),
        PortfolioCommands::Show(args) => show::handle(&args.id, &portfolio, flags),
        PortfolioCommands::Export(args) => export::handle(&args.id, &portfolio, flags),
        PortfolioCommands::Radar(args) => radar::handle(args, &portfolio),
        PortfolioCommands::Remove(args) => remove::handle(&args.id, &mut portfolio, flags),
        PortfolioCommands::Clear(args) => clear::handle(args, &mut portfolio, flags),
    }
}

fn find<'a>(portfolio: &'a PortfolioStore<AppStore>, id: &str) -> anyhow::Result<&'a AuditResult> {
    portfolio
        .get(id)
        .ok_or_else(|| anyhow!("no portfolio entry with id '{id}' (see `cdr portfolio list`)"))
}
