//! Ingest operations.
//!
//! Each operation validates its input, consults the external services it
//! needs through the `astro_core::services` traits, and writes through the
//! repos. Batch operations process items strictly in order, report every item
//! to an [`astro_core::observer::IngestObserver`], and return their counters
//! after checking the batch invariants.

pub mod filters;
pub mod instruments;
pub mod photometry;
pub mod publications;
pub mod sources;
pub mod spectra;

use astro_config::IngestConfig;
use astro_core::errors::CoreError;

use crate::error::IngestError;

/// Whether a failed item aborts its batch.
#[derive(Debug, Clone, Copy)]
pub struct FailurePolicy {
    pub raise_on_error: bool,
    pub raise_on_ambiguity: bool,
}

impl FailurePolicy {
    #[must_use]
    pub const fn from_config(config: &IngestConfig) -> Self {
        Self {
            raise_on_error: config.raise_on_error,
            raise_on_ambiguity: config.raise_on_ambiguity,
        }
    }

    /// Store and invariant errors always abort. Ambiguity and item errors
    /// abort according to their flag.
    #[must_use]
    pub const fn aborts(&self, err: &IngestError) -> bool {
        match err {
            IngestError::Database(_) | IngestError::Invariant(_) => true,
            IngestError::Ambiguous { .. } => self.raise_on_ambiguity,
            _ => self.raise_on_error,
        }
    }
}

fn invariant(err: CoreError) -> IngestError {
    match err {
        CoreError::Invariant(message) => IngestError::Invariant(message),
        other => IngestError::Invariant(other.to_string()),
    }
}

fn counter(len: usize) -> Result<u32, IngestError> {
    u32::try_from(len).map_err(|_| IngestError::Invariant(format!("batch of {len} items is too large")))
}
