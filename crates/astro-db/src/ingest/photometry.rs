//! Photometry batch ingest.

use astro_config::IngestConfig;
use astro_core::entities::Photometry;
use astro_core::enums::ItemStatus;
use astro_core::observer::IngestObserver;
use astro_core::reports::PhotometryBatchReport;

use super::{FailurePolicy, counter, invariant};
use crate::error::IngestError;
use crate::service::AstroService;

impl AstroService {
    async fn ingest_point(&self, point: &Photometry) -> Result<(), IngestError> {
        let source = self.locate_source(&point.source).await?;
        let point = Photometry {
            source,
            ..point.clone()
        };
        self.insert_photometry(&point).await?;
        Ok(())
    }

    /// Ingest photometry points in order. Each point's source must be an
    /// existing source name or alias.
    pub async fn ingest_photometry<O: IngestObserver>(
        &self,
        points: &[Photometry],
        config: &IngestConfig,
        observer: &O,
    ) -> Result<PhotometryBatchReport, IngestError> {
        let policy = FailurePolicy::from_config(config);
        let mut report = PhotometryBatchReport {
            total: counter(points.len())?,
            ..PhotometryBatchReport::default()
        };
        tracing::info!(count = points.len(), "ingesting photometry");
        observer.started(points.len());

        for (index, point) in points.iter().enumerate() {
            let label = format!("{} {}", point.source, point.band);
            let status = match self.ingest_point(point).await {
                Ok(()) => {
                    report.added += 1;
                    ItemStatus::Added
                }
                Err(err) if policy.aborts(&err) => {
                    observer.finished();
                    tracing::error!(point = %label, error = %err, "aborting photometry batch");
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(point = %label, error = %err, "skipping photometry");
                    report.skipped += 1;
                    ItemStatus::Skipped
                }
            };
            observer.item(index, &label, status);
        }

        observer.finished();
        report.verify().map_err(invariant)?;
        tracing::info!(added = report.added, skipped = report.skipped, "photometry batch finished");
        Ok(report)
    }
}
