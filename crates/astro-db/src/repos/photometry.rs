//! Photometry repository.

use astro_core::entities::Photometry;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_f64, get_opt_string, parse_enum};
use crate::integrity::{Constraint, IntegrityViolation};
use crate::service::AstroService;

fn row_to_photometry(row: &libsql::Row) -> Result<Photometry, DatabaseError> {
    Ok(Photometry {
        source: row.get::<String>(0)?,
        band: row.get::<String>(1)?,
        magnitude: row.get::<f64>(2)?,
        magnitude_error: get_opt_f64(row, 3)?,
        telescope: get_opt_string(row, 4)?,
        epoch: get_opt_f64(row, 5)?,
        comments: get_opt_string(row, 6)?,
        reference: row.get::<String>(7)?,
        regime: get_opt_string(row, 8)?
            .map(|label| parse_enum(&label))
            .transpose()?,
    })
}

impl AstroService {
    pub async fn insert_photometry(&self, point: &Photometry) -> Result<(), DatabaseError> {
        point.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO photometry (source, band, magnitude, magnitude_error, telescope, epoch, comments, reference, regime)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    point.source.as_str(),
                    point.band.as_str(),
                    point.magnitude,
                    point.magnitude_error,
                    point.telescope.as_deref(),
                    point.epoch,
                    point.comments.as_deref(),
                    point.reference.as_str(),
                    point.regime.map(|r| r.as_str())
                ],
            )
            .await;

        if let Err(e) = result {
            let parents = [
                ("sources", "source", Some(point.source.as_str())),
                ("publications", "reference", Some(point.reference.as_str())),
                ("photometry_filters", "band", Some(point.band.as_str())),
                ("telescopes", "telescope", point.telescope.as_deref()),
            ];
            return Err(self
                .classify_write(e, &parents, |c| match c {
                    Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(format!(
                        "{} photometry of {} from {}",
                        point.band, point.source, point.reference
                    )),
                    other => other.unknown(),
                })
                .await);
        }
        tracing::debug!(source = %point.source, band = %point.band, "photometry added");
        Ok(())
    }

    pub async fn photometry_of(&self, source: &str) -> Result<Vec<Photometry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT source, band, magnitude, magnitude_error, telescope, epoch, comments, reference, regime
                 FROM photometry WHERE source = ?1 ORDER BY band, reference",
                [source],
            )
            .await?;
        let mut points = Vec::new();
        while let Some(row) = rows.next().await? {
            points.push(row_to_photometry(&row)?);
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{source, test_service};
    use astro_core::entities::PhotometryFilter;
    use astro_core::enums::Regime;
    use pretty_assertions::assert_eq;

    fn j_mag(reference: &str) -> Photometry {
        Photometry {
            source: "TWA 27".into(),
            band: "2MASS.J".into(),
            magnitude: 13.0,
            magnitude_error: Some(0.03),
            telescope: None,
            epoch: None,
            comments: None,
            reference: reference.into(),
            regime: Some(Regime::NirUcd),
        }
    }

    async fn seeded() -> AstroService {
        let svc = test_service().await;
        svc.insert_source(&source("TWA 27", 181.88, -39.55))
            .await
            .unwrap();
        svc.insert_filter(&PhotometryFilter {
            band: "2MASS.J".into(),
            ucd: Some("em.IR.J".into()),
            effective_wavelength_angstroms: 12_350.0,
            width_angstroms: Some(1_624.3),
        })
        .await
        .unwrap();
        svc
    }

    #[tokio::test]
    async fn stored_point_reads_back() {
        let svc = seeded().await;
        svc.insert_photometry(&j_mag("Ref1")).await.unwrap();
        assert_eq!(svc.photometry_of("TWA 27").await.unwrap(), vec![j_mag("Ref1")]);
    }

    #[tokio::test]
    async fn unknown_band_is_named() {
        let svc = seeded().await;
        let point = Photometry {
            band: "WISE.W1".into(),
            ..j_mag("Ref1")
        };
        let err = svc.insert_photometry(&point).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Integrity(IntegrityViolation::UnknownValue { column: "band", .. })
        ));
    }

    #[tokio::test]
    async fn unknown_reference_is_named() {
        let svc = seeded().await;
        let err = svc.insert_photometry(&j_mag("Nope99")).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Integrity(IntegrityViolation::UnknownReference(_))
        ));
    }

    #[tokio::test]
    async fn excess_precision_never_reaches_the_store() {
        let svc = seeded().await;
        let point = Photometry {
            magnitude: 13.123,
            magnitude_error: Some(0.5),
            ..j_mag("Ref1")
        };
        assert!(matches!(
            svc.insert_photometry(&point).await,
            Err(DatabaseError::Validation(_))
        ));
    }
}
