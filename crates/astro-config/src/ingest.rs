//! Defaults for the ingest operations.

use astro_core::enums::SpectrumKey;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

const fn default_radius() -> f64 {
    60.0
}

fn default_spectrum_keys() -> Vec<SpectrumKey> {
    SpectrumKey::DEFAULT_SET.to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Look candidates up in the store before adding them.
    #[serde(default = "default_true")]
    pub search_db: bool,

    /// Cone radius for coordinate matching, in arcseconds.
    #[serde(default = "default_radius")]
    pub search_radius_arcsec: f64,

    /// Abort a batch on the first validation, integrity, or service error.
    #[serde(default = "default_true")]
    pub raise_on_error: bool,

    /// Abort a batch when a candidate matches several sources.
    #[serde(default = "default_true")]
    pub raise_on_ambiguity: bool,

    /// HEAD-check spectrum URLs before storing them.
    #[serde(default = "default_true")]
    pub check_spectrum_urls: bool,

    /// Columns that identify an already-stored spectrum of the same source.
    #[serde(default = "default_spectrum_keys")]
    pub spectra_duplicate_keys: Vec<SpectrumKey>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            search_db: true,
            search_radius_arcsec: default_radius(),
            raise_on_error: true,
            raise_on_ambiguity: true,
            check_spectrum_urls: true,
            spectra_duplicate_keys: default_spectrum_keys(),
        }
    }
}
