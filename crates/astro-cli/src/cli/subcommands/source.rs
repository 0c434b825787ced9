use clap::{Args, Subcommand};

use super::batch::BatchFileArgs;

/// Source commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SourceCommands {
    /// Resolve one source and add it, or an alias of it.
    Ingest(SourceIngestArgs),
    /// Ingest source candidates from a JSONL file.
    IngestBatch(BatchFileArgs),
    /// Show how a name resolves, without writing anything.
    Find {
        name: String,
        /// Right ascension in degrees, for the coordinate stage.
        #[arg(long, requires = "dec", allow_negative_numbers = true)]
        ra: Option<f64>,
        /// Declination in degrees, for the coordinate stage.
        #[arg(long, requires = "ra", allow_negative_numbers = true)]
        dec: Option<f64>,
    },
    /// Add an alternate name to an existing source.
    Alias {
        /// Name of the source as stored.
        source: String,
        /// The alternate name.
        name: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SourceIngestArgs {
    /// Name of the source.
    pub name: String,
    /// Publication the source is discovered in.
    #[arg(long)]
    pub reference: String,
    #[arg(long, requires = "dec", allow_negative_numbers = true)]
    pub ra: Option<f64>,
    #[arg(long, requires = "ra", allow_negative_numbers = true)]
    pub dec: Option<f64>,
    #[arg(long)]
    pub epoch: Option<f64>,
    #[arg(long)]
    pub equinox: Option<String>,
    #[arg(long)]
    pub other_references: Option<String>,
    #[arg(long)]
    pub comments: Option<String>,
    /// Add the source without searching the catalogue for it first.
    #[arg(long)]
    pub no_search: bool,
}
