use astro_db::ingest::publications::PublicationRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PublicationCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `astrodb publication`.
pub async fn handle(
    action: &PublicationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PublicationCommands::Add {
            reference,
            bibcode,
            doi,
            description,
            ignore_ads,
        } => {
            let request = PublicationRequest {
                reference: reference.clone(),
                bibcode: bibcode.clone(),
                doi: doi.clone(),
                description: description.clone(),
                ignore_ads: *ignore_ads,
            };
            let publication = ctx
                .service
                .ingest_publication(&request, &ctx.services)
                .await?;
            output(&publication, flags.format)
        }
        PublicationCommands::Search { text } => {
            let found = ctx.service.search_publications(text).await?;
            output(&found, flags.format)
        }
    }
}
