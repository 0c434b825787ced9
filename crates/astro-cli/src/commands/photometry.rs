use astro_core::entities::Photometry;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PhotometryCommands;
use crate::commands::batch_config;
use crate::context::AppContext;
use crate::input::read_batch;
use crate::output::output;
use crate::progress::BatchProgress;

/// Handle `astrodb photometry`.
pub async fn handle(
    action: &PhotometryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PhotometryCommands::IngestBatch(args) => {
            let points: Vec<Photometry> = read_batch(&args.file, Some("photometry"))?;
            let config = batch_config(&ctx.config.ingest, args);
            let progress = BatchProgress::new("photometry");
            let report = ctx
                .service
                .ingest_photometry(&points, &config, &progress)
                .await?;
            output(&report, flags.format)
        }
    }
}
