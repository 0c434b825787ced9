//! Per-item outcomes and batch counters returned by the ingest operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ItemStatus, MatchStage};
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// What happened to one source candidate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// New source and its self alias were written.
    Added { source: String },
    /// Candidate denotes an existing source under another name; alias written.
    AliasAdded {
        source: String,
        alias: String,
        stage: MatchStage,
    },
    /// Candidate is already an alias of an existing source.
    AlreadyPresent { source: String },
    /// Several existing sources match; nothing written.
    Ambiguous { matches: Vec<String> },
    /// Validation, integrity, or external failure; nothing written.
    Skipped { reason: String },
}

impl SourceOutcome {
    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        match self {
            Self::Added { .. } => ItemStatus::Added,
            Self::AliasAdded { .. } | Self::AlreadyPresent { .. } => ItemStatus::Existing,
            Self::Ambiguous { .. } => ItemStatus::Ambiguous,
            Self::Skipped { .. } => ItemStatus::Skipped,
        }
    }
}

/// Counters for a batch of source candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceBatchReport {
    pub total: u32,
    pub added: u32,
    pub existing: u32,
    pub ambiguous: u32,
    pub skipped: u32,
    /// Self aliases written alongside new sources.
    pub self_aliases_added: u32,
    /// Aliases written for candidates that matched an existing source.
    pub alt_aliases_added: u32,
}

impl SourceBatchReport {
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self {
            total,
            added: 0,
            existing: 0,
            ambiguous: 0,
            skipped: 0,
            self_aliases_added: 0,
            alt_aliases_added: 0,
        }
    }

    pub const fn record(&mut self, outcome: &SourceOutcome) {
        match outcome {
            SourceOutcome::Added { .. } => {
                self.added += 1;
                self.self_aliases_added += 1;
            }
            SourceOutcome::AliasAdded { .. } => {
                self.existing += 1;
                self.alt_aliases_added += 1;
            }
            SourceOutcome::AlreadyPresent { .. } => self.existing += 1,
            SourceOutcome::Ambiguous { .. } => self.ambiguous += 1,
            SourceOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Total aliases written by the batch.
    #[must_use]
    pub const fn aliases_added(&self) -> u32 {
        self.self_aliases_added + self.alt_aliases_added
    }

    /// Every candidate is counted exactly once and each new source has its
    /// self alias.
    pub fn verify(&self) -> Result<(), CoreError> {
        let counted = self.added + self.existing + self.ambiguous + self.skipped;
        if counted != self.total {
            return Err(CoreError::Invariant(format!(
                "{counted} outcomes recorded for {} candidates",
                self.total
            )));
        }
        if self.self_aliases_added != self.added {
            return Err(CoreError::Invariant(format!(
                "{} self aliases written for {} new sources",
                self.self_aliases_added, self.added
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Photometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PhotometryBatchReport {
    pub total: u32,
    pub added: u32,
    pub skipped: u32,
}

impl PhotometryBatchReport {
    pub fn verify(&self) -> Result<(), CoreError> {
        if self.added + self.skipped == self.total {
            Ok(())
        } else {
            Err(CoreError::Invariant(format!(
                "{} added + {} skipped != {} points",
                self.added, self.skipped, self.total
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Spectra
// ---------------------------------------------------------------------------

/// What happened to one spectrum row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumOutcome {
    Added,
    Duplicate,
    BlankDate,
    MissingInstrument,
    Skipped,
}

impl SpectrumOutcome {
    #[must_use]
    pub const fn status(self) -> ItemStatus {
        match self {
            Self::Added => ItemStatus::Added,
            Self::Duplicate => ItemStatus::Duplicate,
            Self::BlankDate | Self::MissingInstrument | Self::Skipped => ItemStatus::Skipped,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpectraBatchReport {
    pub total: u32,
    pub added: u32,
    pub duplicates: u32,
    pub blank_dates: u32,
    pub missing_instrument: u32,
    pub skipped: u32,
}

impl SpectraBatchReport {
    pub const fn record(&mut self, outcome: SpectrumOutcome) {
        match outcome {
            SpectrumOutcome::Added => self.added += 1,
            SpectrumOutcome::Duplicate => self.duplicates += 1,
            SpectrumOutcome::BlankDate => self.blank_dates += 1,
            SpectrumOutcome::MissingInstrument => self.missing_instrument += 1,
            SpectrumOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn verify(&self) -> Result<(), CoreError> {
        let counted =
            self.added + self.duplicates + self.blank_dates + self.missing_instrument + self.skipped;
        if counted == self.total {
            Ok(())
        } else {
            Err(CoreError::Invariant(format!(
                "{counted} outcomes recorded for {} spectra",
                self.total
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Single-record operations
// ---------------------------------------------------------------------------

/// Rows created by an instrument ingest.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InstrumentReport {
    pub telescope_added: bool,
    pub instrument_added: bool,
}

/// Result of registering a photometry filter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FilterOutcome {
    Added {
        band: String,
        ucd: Option<String>,
        effective_wavelength_angstroms: f64,
        width_angstroms: f64,
    },
    AlreadyPresent { band: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn source_counters_balance() {
        let mut report = SourceBatchReport::new(5);
        for outcome in [
            SourceOutcome::Added {
                source: "A".into(),
            },
            SourceOutcome::Added {
                source: "B".into(),
            },
            SourceOutcome::AliasAdded {
                source: "C".into(),
                alias: "c".into(),
                stage: MatchStage::Fuzzy,
            },
            SourceOutcome::Ambiguous {
                matches: vec!["D".into(), "E".into()],
            },
            SourceOutcome::Skipped {
                reason: "no coordinates".into(),
            },
        ] {
            report.record(&outcome);
        }
        assert!(report.verify().is_ok());
        assert_eq!(report.aliases_added(), 3);
        assert_eq!(report.existing, 1);
    }

    #[test]
    fn unbalanced_source_report_is_an_invariant_error() {
        let mut report = SourceBatchReport::new(2);
        report.record(&SourceOutcome::AlreadyPresent {
            source: "A".into(),
        });
        let err = report.verify().unwrap_err();
        assert_eq!(
            err.to_string(),
            "batch invariant violated: 1 outcomes recorded for 2 candidates"
        );
    }

    #[test]
    fn spectra_counters_balance() {
        let mut report = SpectraBatchReport {
            total: 3,
            ..SpectraBatchReport::default()
        };
        report.record(SpectrumOutcome::Added);
        report.record(SpectrumOutcome::Duplicate);
        report.record(SpectrumOutcome::BlankDate);
        assert!(report.verify().is_ok());
    }

    #[test]
    fn source_outcome_serializes_with_tag() {
        let json = serde_json::to_value(SourceOutcome::Added {
            source: "V4046 Sgr".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"outcome": "added", "source": "V4046 Sgr"})
        );
    }
}
