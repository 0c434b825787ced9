//! Photometry filter repository.

use astro_core::entities::PhotometryFilter;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_f64, get_opt_string};
use crate::integrity::{Constraint, IntegrityViolation, on_write};
use crate::service::AstroService;

fn row_to_filter(row: &libsql::Row) -> Result<PhotometryFilter, DatabaseError> {
    Ok(PhotometryFilter {
        band: row.get::<String>(0)?,
        ucd: get_opt_string(row, 1)?,
        effective_wavelength_angstroms: row.get::<f64>(2)?,
        width_angstroms: get_opt_f64(row, 3)?,
    })
}

impl AstroService {
    pub async fn get_filter(&self, band: &str) -> Result<Option<PhotometryFilter>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT band, ucd, effective_wavelength_angstroms, width_angstroms
                 FROM photometry_filters WHERE band = ?1",
                [band],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_filter(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_filters(&self) -> Result<Vec<PhotometryFilter>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT band, ucd, effective_wavelength_angstroms, width_angstroms
                 FROM photometry_filters ORDER BY effective_wavelength_angstroms",
                (),
            )
            .await?;
        let mut filters = Vec::new();
        while let Some(row) = rows.next().await? {
            filters.push(row_to_filter(&row)?);
        }
        Ok(filters)
    }

    pub async fn insert_filter(&self, filter: &PhotometryFilter) -> Result<(), DatabaseError> {
        filter.validate()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO photometry_filters (band, ucd, effective_wavelength_angstroms, width_angstroms)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    filter.band.as_str(),
                    filter.ucd.as_deref(),
                    filter.effective_wavelength_angstroms,
                    filter.width_angstroms
                ],
            )
            .await
            .map_err(|e| {
                on_write(e, |c| match c {
                    Constraint::Unique(_) => {
                        IntegrityViolation::DuplicateRecord(format!("band {}", filter.band))
                    }
                    other => other.unknown(),
                })
            })?;
        tracing::debug!(band = %filter.band, ucd = ?filter.ucd, "filter added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use astro_core::validation::ValidationError;
    use pretty_assertions::assert_eq;

    fn filter(band: &str, wavelength: f64) -> PhotometryFilter {
        PhotometryFilter {
            band: band.into(),
            ucd: None,
            effective_wavelength_angstroms: wavelength,
            width_angstroms: Some(100.0),
        }
    }

    #[tokio::test]
    async fn filters_list_by_wavelength() {
        let svc = test_service().await;
        svc.insert_filter(&filter("2MASS.Ks", 21_590.0)).await.unwrap();
        svc.insert_filter(&filter("2MASS.J", 12_350.0)).await.unwrap();
        let bands: Vec<String> = svc
            .list_filters()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.band)
            .collect();
        assert_eq!(bands, vec!["2MASS.J", "2MASS.Ks"]);
    }

    #[tokio::test]
    async fn malformed_band_is_a_validation_error() {
        let svc = test_service().await;
        let err = svc
            .insert_filter(&filter("not_a_filter", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Validation(ValidationError::MalformedBand(_))
        ));
        assert_eq!(svc.get_filter("not_a_filter").await.unwrap(), None);
    }
}
