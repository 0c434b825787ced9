//! Spectra repository.

use astro_core::entities::Spectrum;
use astro_core::enums::SpectrumKey;

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_string, parse_date, parse_enum};
use crate::integrity::{Constraint, IntegrityViolation};
use crate::service::AstroService;

fn row_to_spectrum(row: &libsql::Row) -> Result<Spectrum, DatabaseError> {
    Ok(Spectrum {
        source: row.get::<String>(0)?,
        access_url: row.get::<String>(1)?,
        original_spectrum: get_opt_string(row, 2)?,
        local_spectrum: get_opt_string(row, 3)?,
        regime: parse_enum(&row.get::<String>(4)?)?,
        telescope: get_opt_string(row, 5)?,
        instrument: get_opt_string(row, 6)?,
        mode: get_opt_string(row, 7)?,
        observation_date: parse_date(&row.get::<String>(8)?)?,
        comments: get_opt_string(row, 9)?,
        reference: row.get::<String>(10)?,
    })
}

fn key_value(spectrum: &Spectrum, key: SpectrumKey) -> libsql::Value {
    let text = |s: &str| libsql::Value::Text(s.to_string());
    let optional = |s: Option<&str>| s.map_or(libsql::Value::Null, text);
    match key {
        SpectrumKey::Reference => text(&spectrum.reference),
        SpectrumKey::ObservationDate => libsql::Value::Text(format_date(&spectrum.observation_date)),
        SpectrumKey::Telescope => optional(spectrum.telescope.as_deref()),
        SpectrumKey::Instrument => optional(spectrum.instrument.as_deref()),
        SpectrumKey::Mode => optional(spectrum.mode.as_deref()),
        SpectrumKey::Regime => text(spectrum.regime.as_str()),
        SpectrumKey::AccessUrl => text(&spectrum.access_url),
    }
}

impl AstroService {
    pub async fn insert_spectrum(&self, spectrum: &Spectrum) -> Result<(), DatabaseError> {
        spectrum.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO spectra (source, access_url, original_spectrum, local_spectrum, regime,
                                      telescope, instrument, mode, observation_date, comments, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    spectrum.source.as_str(),
                    spectrum.access_url.as_str(),
                    spectrum.original_spectrum.as_deref(),
                    spectrum.local_spectrum.as_deref(),
                    spectrum.regime.as_str(),
                    spectrum.telescope.as_deref(),
                    spectrum.instrument.as_deref(),
                    spectrum.mode.as_deref(),
                    format_date(&spectrum.observation_date),
                    spectrum.comments.as_deref(),
                    spectrum.reference.as_str()
                ],
            )
            .await;
        if let Err(e) = result {
            let parents = [
                ("sources", "source", Some(spectrum.source.as_str())),
                ("publications", "reference", Some(spectrum.reference.as_str())),
                ("regimes", "regime", Some(spectrum.regime.as_str())),
                ("telescopes", "telescope", spectrum.telescope.as_deref()),
                ("instruments", "instrument", spectrum.instrument.as_deref()),
            ];
            return Err(self
                .classify_write(e, &parents, |c| match c {
                    Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(format!(
                        "{} spectrum of {} observed {}",
                        spectrum.regime, spectrum.source, spectrum.observation_date
                    )),
                    other => other.unknown(),
                })
                .await);
        }
        tracing::debug!(source = %spectrum.source, url = %spectrum.access_url, "spectrum added");
        Ok(())
    }

    pub async fn spectra_of(&self, source: &str) -> Result<Vec<Spectrum>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT source, access_url, original_spectrum, local_spectrum, regime, telescope,
                        instrument, mode, observation_date, comments, reference
                 FROM spectra WHERE source = ?1 ORDER BY observation_date",
                [source],
            )
            .await?;
        let mut spectra = Vec::new();
        while let Some(row) = rows.next().await? {
            spectra.push(row_to_spectrum(&row)?);
        }
        Ok(spectra)
    }

    /// Number of stored spectra of the same source that agree with `spectrum`
    /// on every column in `keys`. NULLs compare equal.
    pub async fn count_matching_spectra(
        &self,
        spectrum: &Spectrum,
        keys: &[SpectrumKey],
    ) -> Result<u64, DatabaseError> {
        let mut sql = String::from("SELECT COUNT(*) FROM spectra WHERE source = ?1");
        let mut params = vec![libsql::Value::Text(spectrum.source.clone())];
        for (offset, key) in keys.iter().enumerate() {
            sql.push_str(&format!(" AND {} IS ?{}", key.column(), offset + 2));
            params.push(key_value(spectrum, *key));
        }

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|e| DatabaseError::InvalidState(format!("negative count: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{source, test_service};
    use astro_core::entities::parse_observation_date;
    use astro_core::enums::Regime;
    use pretty_assertions::assert_eq;

    fn nir(date: &str, url: &str) -> Spectrum {
        Spectrum {
            source: "TWA 27".into(),
            access_url: url.into(),
            original_spectrum: None,
            local_spectrum: None,
            regime: Regime::Nir,
            telescope: None,
            instrument: None,
            mode: None,
            observation_date: parse_observation_date(date).unwrap(),
            comments: None,
            reference: "Ref1".into(),
        }
    }

    #[tokio::test]
    async fn spectrum_round_trips() {
        let svc = test_service().await;
        svc.insert_source(&source("TWA 27", 181.88, -39.55))
            .await
            .unwrap();
        let spectrum = nir("2013-03-02T05:17:31", "https://example.org/a.fits");
        svc.insert_spectrum(&spectrum).await.unwrap();
        assert_eq!(svc.spectra_of("TWA 27").await.unwrap(), vec![spectrum]);
    }

    #[tokio::test]
    async fn duplicate_count_follows_the_key_set() {
        let svc = test_service().await;
        svc.insert_source(&source("TWA 27", 181.88, -39.55))
            .await
            .unwrap();
        svc.insert_spectrum(&nir("2013-03-02", "https://example.org/a.fits"))
            .await
            .unwrap();

        let same_night_other_file = nir("2013-03-02", "https://example.org/b.fits");
        assert_eq!(
            svc.count_matching_spectra(&same_night_other_file, &SpectrumKey::DEFAULT_SET)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            svc.count_matching_spectra(
                &same_night_other_file,
                &[SpectrumKey::Reference, SpectrumKey::AccessUrl]
            )
            .await
            .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn instrument_without_row_is_named() {
        let svc = test_service().await;
        svc.insert_source(&source("TWA 27", 181.88, -39.55))
            .await
            .unwrap();
        let spectrum = Spectrum {
            telescope: Some("IRTF".into()),
            instrument: Some("SpeX".into()),
            mode: Some("Prism".into()),
            ..nir("2013-03-02", "https://example.org/a.fits")
        };
        let err = svc.insert_spectrum(&spectrum).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Integrity(IntegrityViolation::UnknownValue { .. })
        ));
    }
}
