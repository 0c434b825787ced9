//! Spectra batch ingest.
//!
//! Rows arrive as loosely typed records (dates and regimes as text) so that
//! a bad row is counted and skipped instead of failing the whole file.

use astro_config::IngestConfig;
use astro_core::entities::{Spectrum, parse_observation_date};
use astro_core::enums::Regime;
use astro_core::observer::IngestObserver;
use astro_core::reports::{SpectraBatchReport, SpectrumOutcome};
use astro_core::services::LinkChecker;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{FailurePolicy, counter, invariant};
use crate::error::IngestError;
use crate::helpers::non_blank;
use crate::service::AstroService;

/// One spectrum as read from a batch file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpectrumRow {
    pub source: String,
    pub access_url: String,
    #[serde(default)]
    pub original_spectrum: Option<String>,
    #[serde(default)]
    pub local_spectrum: Option<String>,
    pub regime: String,
    #[serde(default)]
    pub telescope: Option<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub observation_date: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    pub reference: String,
}

fn owned(value: Option<&String>) -> Option<String> {
    value.map(String::as_str).and_then(non_blank).map(ToString::to_string)
}

impl AstroService {
    async fn check_link<L: LinkChecker>(&self, links: &L, url: &str) -> Result<(), IngestError> {
        let status = links
            .status(url)
            .await
            .map_err(|source| IngestError::External {
                name: url.to_string(),
                source,
            })?;
        if status == 200 {
            Ok(())
        } else {
            Err(IngestError::Inaccessible {
                url: url.to_string(),
                status,
            })
        }
    }

    /// Whether the spectrum names an instrument setup that is registered.
    /// A spectrum naming none of telescope, instrument and mode passes.
    async fn instrument_known(&self, spectrum: &Spectrum) -> Result<bool, IngestError> {
        match (
            spectrum.telescope.as_deref(),
            spectrum.instrument.as_deref(),
            spectrum.mode.as_deref(),
        ) {
            (None, None, None) => Ok(true),
            (Some(telescope), Some(instrument), Some(mode)) => {
                Ok(self.instrument_exists(instrument, mode, telescope).await?)
            }
            _ => Ok(false),
        }
    }

    /// Ingest one spectrum row. Counted outcomes come back as `Ok`; rows that
    /// cannot be stored come back as errors with nothing written.
    pub async fn ingest_spectrum<L: LinkChecker>(
        &self,
        row: &SpectrumRow,
        links: &L,
        config: &IngestConfig,
    ) -> Result<SpectrumOutcome, IngestError> {
        let source = self.locate_source(&row.source).await?;

        if config.check_spectrum_urls {
            self.check_link(links, row.access_url.trim()).await?;
            if let Some(original) = owned(row.original_spectrum.as_ref()) {
                self.check_link(links, &original).await?;
            }
        }

        let Some(date) = owned(row.observation_date.as_ref()) else {
            tracing::debug!(source = %source, url = %row.access_url, "blank observation date");
            return Ok(SpectrumOutcome::BlankDate);
        };

        let spectrum = Spectrum {
            source,
            access_url: row.access_url.trim().to_string(),
            original_spectrum: owned(row.original_spectrum.as_ref()),
            local_spectrum: owned(row.local_spectrum.as_ref()),
            regime: row.regime.trim().parse::<Regime>()?,
            telescope: owned(row.telescope.as_ref()),
            instrument: owned(row.instrument.as_ref()),
            mode: owned(row.mode.as_ref()),
            observation_date: parse_observation_date(&date)?,
            comments: owned(row.comments.as_ref()),
            reference: row.reference.trim().to_string(),
        };
        spectrum.validate()?;

        if !self.instrument_known(&spectrum).await? {
            tracing::debug!(
                source = %spectrum.source,
                telescope = ?spectrum.telescope,
                instrument = ?spectrum.instrument,
                mode = ?spectrum.mode,
                "instrument setup not registered"
            );
            return Ok(SpectrumOutcome::MissingInstrument);
        }

        if self
            .count_matching_spectra(&spectrum, &config.spectra_duplicate_keys)
            .await?
            > 0
        {
            tracing::debug!(source = %spectrum.source, url = %spectrum.access_url, "duplicate spectrum");
            return Ok(SpectrumOutcome::Duplicate);
        }

        self.insert_spectrum(&spectrum).await?;
        Ok(SpectrumOutcome::Added)
    }

    /// Ingest spectrum rows in order.
    pub async fn ingest_spectra<L, O>(
        &self,
        rows: &[SpectrumRow],
        links: &L,
        config: &IngestConfig,
        observer: &O,
    ) -> Result<SpectraBatchReport, IngestError>
    where
        L: LinkChecker,
        O: IngestObserver,
    {
        let policy = FailurePolicy::from_config(config);
        let mut report = SpectraBatchReport {
            total: counter(rows.len())?,
            ..SpectraBatchReport::default()
        };
        tracing::info!(count = rows.len(), "ingesting spectra");
        observer.started(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let outcome = match self.ingest_spectrum(row, links, config).await {
                Ok(outcome) => outcome,
                Err(err) if policy.aborts(&err) => {
                    observer.finished();
                    tracing::error!(source = %row.source, url = %row.access_url, error = %err, "aborting spectra batch");
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(source = %row.source, url = %row.access_url, error = %err, "skipping spectrum");
                    SpectrumOutcome::Skipped
                }
            };
            report.record(outcome);
            observer.item(index, &row.source, outcome.status());
        }

        observer.finished();
        report.verify().map_err(invariant)?;
        tracing::info!(
            added = report.added,
            duplicates = report.duplicates,
            blank_dates = report.blank_dates,
            missing_instrument = report.missing_instrument,
            skipped = report.skipped,
            "spectra batch finished"
        );
        Ok(report)
    }
}
