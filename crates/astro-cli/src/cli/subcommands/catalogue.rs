use clap::Subcommand;

/// Publication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PublicationCommands {
    /// Add a publication, filling it in from ADS when possible.
    Add {
        /// Short reference key, e.g. Smit21. Derived from ADS when omitted.
        #[arg(long)]
        reference: Option<String>,
        /// ADS bibcode or arXiv identifier.
        #[arg(long)]
        bibcode: Option<String>,
        #[arg(long)]
        doi: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Do not query ADS even when a token is configured.
        #[arg(long)]
        ignore_ads: bool,
    },
    /// Search publications by reference, bibcode, DOI or description.
    Search { text: String },
}

/// Instrument commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InstrumentCommands {
    /// Add a telescope, and optionally an instrument mode on it.
    Add {
        #[arg(long)]
        telescope: String,
        #[arg(long, requires = "mode")]
        instrument: Option<String>,
        #[arg(long, requires = "instrument")]
        mode: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reference: Option<String>,
    },
}

/// Photometry filter commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FilterCommands {
    /// Register a passband from the SVO Filter Profile Service.
    Add {
        #[arg(long)]
        telescope: String,
        #[arg(long)]
        instrument: String,
        #[arg(long)]
        filter: String,
        /// UCD to store instead of the one derived from the wavelength.
        #[arg(long)]
        ucd: Option<String>,
    },
    /// List registered filters.
    List,
}
