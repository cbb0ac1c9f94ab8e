use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Wizard => commands::wizard::handle(ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::QuickTest(args) => commands::quick_test::handle(&args, ctx, flags),
        Commands::Portfolio { action } => commands::portfolio::handle(&action, ctx, flags),
        Commands::Key { action } => commands::key::handle(&action, ctx, flags),
        Commands::Fiches { .. } | Commands::Schema(_) => {
            unreachable!("fiches/schema are pre-dispatched in main")
        }
    }
}
