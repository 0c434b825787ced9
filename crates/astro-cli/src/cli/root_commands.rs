use clap::Subcommand;

use crate::cli::subcommands::{
    FilterCommands, InstrumentCommands, PhotometryCommands, PublicationCommands, SchemaCommands,
    SourceCommands, SpectraCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the database, or bring an existing one up to date.
    Init,
    /// Sources and their alternate names.
    Source {
        #[command(subcommand)]
        action: SourceCommands,
    },
    /// Publications.
    Publication {
        #[command(subcommand)]
        action: PublicationCommands,
    },
    /// Telescopes and instruments.
    Instrument {
        #[command(subcommand)]
        action: InstrumentCommands,
    },
    /// Photometry filters.
    Filter {
        #[command(subcommand)]
        action: FilterCommands,
    },
    /// Photometry measurements.
    Photometry {
        #[command(subcommand)]
        action: PhotometryCommands,
    },
    /// Spectra.
    Spectra {
        #[command(subcommand)]
        action: SpectraCommands,
    },
    /// Run the data quality checks over the whole catalogue.
    Check,
    /// Schema documentation, ERD and JSON Schemas.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
}
