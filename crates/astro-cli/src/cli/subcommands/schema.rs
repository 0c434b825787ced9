use std::path::PathBuf;

use clap::Subcommand;

/// Schema commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// Write one Markdown page per table.
    Docs {
        #[arg(long, default_value = "docs/schema")]
        out: PathBuf,
    },
    /// Print the Mermaid entity relationship diagram.
    Erd,
    /// Print the JSON Schema of a record type.
    Json {
        /// Registered type name, e.g. source_candidate. `list` prints the names.
        type_name: String,
    },
}
