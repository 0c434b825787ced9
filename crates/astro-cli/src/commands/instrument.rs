use astro_db::ingest::instruments::InstrumentRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InstrumentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `astrodb instrument`.
pub async fn handle(
    action: &InstrumentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InstrumentCommands::Add {
            telescope,
            instrument,
            mode,
            description,
            reference,
        } => {
            let request = InstrumentRequest {
                telescope: telescope.clone(),
                instrument: instrument.clone(),
                mode: mode.clone(),
                description: description.clone(),
                reference: reference.clone(),
            };
            let report = ctx.service.ingest_instrument(&request).await?;
            output(&report, flags.format)
        }
    }
}
