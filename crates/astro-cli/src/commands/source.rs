use astro_core::coords::SkyPosition;
use astro_core::entities::{Alias, SourceCandidate};
use astro_config::IngestConfig;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BatchFileArgs, SourceCommands, SourceIngestArgs};
use crate::commands::batch_config;
use crate::context::AppContext;
use crate::input::read_batch;
use crate::output::output;
use crate::progress::BatchProgress;

/// Handle `astrodb source`.
pub async fn handle(
    action: &SourceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SourceCommands::Ingest(args) => ingest(args, ctx, flags).await,
        SourceCommands::IngestBatch(args) => ingest_batch(args, ctx, flags).await,
        SourceCommands::Find { name, ra, dec } => find(name, *ra, *dec, ctx, flags).await,
        SourceCommands::Alias { source, name } => alias(source, name, ctx, flags).await,
    }
}

fn candidate(args: &SourceIngestArgs) -> SourceCandidate {
    SourceCandidate {
        source: args.name.clone(),
        reference: Some(args.reference.clone()),
        ra_deg: args.ra,
        dec_deg: args.dec,
        epoch_year: args.epoch,
        equinox: args.equinox.clone(),
        other_references: args.other_references.clone(),
        comments: args.comments.clone(),
    }
}

async fn ingest(args: &SourceIngestArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = IngestConfig {
        search_db: ctx.config.ingest.search_db && !args.no_search,
        ..ctx.config.ingest.clone()
    };
    let outcome = ctx
        .service
        .ingest_source(&candidate(args), &ctx.services, &config)
        .await?;
    output(&outcome, flags.format)
}

async fn ingest_batch(args: &BatchFileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let candidates: Vec<SourceCandidate> = read_batch(&args.file, Some("source_candidate"))?;
    let config = batch_config(&ctx.config.ingest, args);
    let progress = BatchProgress::new("sources");
    let report = ctx
        .service
        .ingest_sources(&candidates, &ctx.services, &config, &progress)
        .await?;
    output(&report, flags.format)
}

async fn find(
    name: &str,
    ra: Option<f64>,
    dec: Option<f64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let position = SkyPosition::from_parts(ra, dec)?;
    let lookup = ctx
        .service
        .find_source(
            name,
            position,
            &ctx.services,
            ctx.config.ingest.search_radius_arcsec,
        )
        .await?;
    output(
        &json!({
            "name": name,
            "class": lookup.resolution.class,
            "stage": lookup.resolution.stage,
            "matches": lookup.resolution.matches,
            "resolver_consulted": lookup.resolver_consulted,
            "resolved": lookup.resolved,
        }),
        flags.format,
    )
}

async fn alias(source: &str, name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let alias = Alias {
        source: source.trim().to_string(),
        other_name: name.trim().to_string(),
    };
    ctx.service.add_alias(&alias).await?;
    output(&alias, flags.format)
}
