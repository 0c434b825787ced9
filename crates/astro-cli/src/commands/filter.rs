use astro_db::ingest::filters::FilterRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FilterCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `astrodb filter`.
pub async fn handle(action: &FilterCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FilterCommands::Add {
            telescope,
            instrument,
            filter,
            ucd,
        } => {
            let request = FilterRequest {
                telescope: telescope.clone(),
                instrument: instrument.clone(),
                filter: filter.clone(),
                ucd: ucd.clone(),
            };
            let outcome = ctx.service.ingest_filter(&request, &ctx.services).await?;
            output(&outcome, flags.format)
        }
        FilterCommands::List => {
            let filters = ctx.service.list_filters().await?;
            output(&filters, flags.format)
        }
    }
}
