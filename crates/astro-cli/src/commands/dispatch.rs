use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::handle(ctx, flags).await,
        Commands::Source { action } => commands::source::handle(&action, ctx, flags).await,
        Commands::Publication { action } => commands::publication::handle(&action, ctx, flags).await,
        Commands::Instrument { action } => commands::instrument::handle(&action, ctx, flags).await,
        Commands::Filter { action } => commands::filter::handle(&action, ctx, flags).await,
        Commands::Photometry { action } => commands::photometry::handle(&action, ctx, flags).await,
        Commands::Spectra { action } => commands::spectra::handle(&action, ctx, flags).await,
        Commands::Check => commands::check::handle(ctx, flags).await,
        Commands::Schema { .. } => unreachable!("schema is pre-dispatched in main"),
    }
}
