//! Telescope and instrument repository.

use astro_core::entities::{Instrument, Telescope};

use crate::error::DatabaseError;
use crate::integrity::{Constraint, IntegrityViolation, on_write};
use crate::service::AstroService;

fn reference_violation(reference: Option<&str>, constraint: Constraint) -> IntegrityViolation {
    match (constraint, reference) {
        (Constraint::ForeignKey, Some(reference)) => {
            IntegrityViolation::UnknownReference(reference.to_string())
        }
        (other, _) => other.unknown(),
    }
}

impl AstroService {
    pub async fn telescope_exists(&self, telescope: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM telescopes WHERE telescope = ?1", [telescope])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    pub async fn insert_telescope(&self, telescope: &Telescope) -> Result<(), DatabaseError> {
        telescope.validate()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO telescopes (telescope, description, reference) VALUES (?1, ?2, ?3)",
                libsql::params![
                    telescope.telescope.as_str(),
                    telescope.description.as_deref(),
                    telescope.reference.as_deref()
                ],
            )
            .await
            .map_err(|e| {
                on_write(e, |c| match c {
                    Constraint::Unique(_) => {
                        IntegrityViolation::DuplicateRecord(format!("telescope {}", telescope.telescope))
                    }
                    other => reference_violation(telescope.reference.as_deref(), other),
                })
            })?;
        tracing::debug!(telescope = %telescope.telescope, "telescope added");
        Ok(())
    }

    pub async fn instrument_exists(
        &self,
        instrument: &str,
        mode: &str,
        telescope: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM instruments WHERE instrument = ?1 AND mode = ?2 AND telescope = ?3",
                [instrument, mode, telescope],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    pub async fn insert_instrument(&self, instrument: &Instrument) -> Result<(), DatabaseError> {
        instrument.validate()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO instruments (instrument, mode, telescope, description, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    instrument.instrument.as_str(),
                    instrument.mode.as_str(),
                    instrument.telescope.as_str(),
                    instrument.description.as_deref(),
                    instrument.reference.as_deref()
                ],
            )
            .await
            .map_err(|e| {
                on_write(e, |c| match c {
                    Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(format!(
                        "instrument {} / {} / {}",
                        instrument.instrument, instrument.mode, instrument.telescope
                    )),
                    other => reference_violation(instrument.reference.as_deref(), other),
                })
            })?;
        tracing::debug!(
            instrument = %instrument.instrument,
            mode = %instrument.mode,
            telescope = %instrument.telescope,
            "instrument added"
        );
        Ok(())
    }
}
