use astro_db::ingest::spectra::SpectrumRow;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SpectraCommands;
use crate::commands::batch_config;
use crate::context::AppContext;
use crate::input::read_batch;
use crate::output::output;
use crate::progress::BatchProgress;

/// Handle `astrodb spectra`.
pub async fn handle(action: &SpectraCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SpectraCommands::IngestBatch {
            batch,
            skip_url_check,
        } => {
            // Rows stay loosely typed so bad dates and regimes are counted, not fatal.
            let rows: Vec<SpectrumRow> = read_batch(&batch.file, None)?;
            let mut config = batch_config(&ctx.config.ingest, batch);
            config.check_spectrum_urls &= !skip_url_check;
            let progress = BatchProgress::new("spectra");
            let report = ctx
                .service
                .ingest_spectra(&rows, &ctx.services, &config, &progress)
                .await?;
            output(&report, flags.format)
        }
    }
}
