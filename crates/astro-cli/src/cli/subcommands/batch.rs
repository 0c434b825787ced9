use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Options shared by every batch ingest.
#[derive(Clone, Debug, Args)]
pub struct BatchFileArgs {
    /// JSONL file, one record per line.
    #[arg(long)]
    pub file: PathBuf,
    /// Count failed items and keep going instead of stopping at the first.
    #[arg(long)]
    pub keep_going: bool,
    /// Count ambiguous sources and keep going.
    #[arg(long)]
    pub allow_ambiguous: bool,
}

/// Photometry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PhotometryCommands {
    /// Ingest photometry points from a JSONL file.
    IngestBatch(BatchFileArgs),
}

/// Spectra commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SpectraCommands {
    /// Ingest spectra from a JSONL file.
    IngestBatch {
        #[command(flatten)]
        batch: BatchFileArgs,
        /// Skip the HEAD requests on spectrum URLs.
        #[arg(long)]
        skip_url_check: bool,
    },
}
