//! Parameter list, modeled parameters, and data release versions.

use astro_core::entities::{ModeledParameter, Parameter, Version};

use crate::error::DatabaseError;
use crate::integrity::{Constraint, IntegrityViolation, on_write};
use crate::service::AstroService;

impl AstroService {
    pub async fn insert_parameter(&self, parameter: &Parameter) -> Result<(), DatabaseError> {
        parameter.validate()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO parameter_list (parameter, description) VALUES (?1, ?2)",
                libsql::params![parameter.parameter.as_str(), parameter.description.as_deref()],
            )
            .await
            .map_err(|e| {
                on_write(e, |c| match c {
                    Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(format!(
                        "parameter {}",
                        parameter.parameter
                    )),
                    other => other.unknown(),
                })
            })?;
        Ok(())
    }

    pub async fn insert_modeled_parameter(&self, modeled: &ModeledParameter) -> Result<(), DatabaseError> {
        modeled.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO modeled_parameters (source, model, parameter, value, error, unit, comments, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    modeled.source.as_str(),
                    modeled.model.as_deref(),
                    modeled.parameter.as_str(),
                    modeled.value,
                    modeled.error,
                    modeled.unit.as_deref(),
                    modeled.comments.as_deref(),
                    modeled.reference.as_str()
                ],
            )
            .await;
        if let Err(e) = result {
            let parents = [
                ("sources", "source", Some(modeled.source.as_str())),
                ("parameter_list", "parameter", Some(modeled.parameter.as_str())),
                ("publications", "reference", Some(modeled.reference.as_str())),
            ];
            return Err(self
                .classify_write(e, &parents, |c| match c {
                    Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(format!(
                        "{} of {} from {}",
                        modeled.parameter, modeled.source, modeled.reference
                    )),
                    other => other.unknown(),
                })
                .await);
        }
        Ok(())
    }

    pub async fn insert_version(&self, version: &Version) -> Result<(), DatabaseError> {
        version.validate()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO versions (version, start_date, end_date, description) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    version.version.as_str(),
                    version.start_date.as_deref(),
                    version.end_date.as_deref(),
                    version.description.as_deref()
                ],
            )
            .await
            .map_err(|e| {
                on_write(e, |c| match c {
                    Constraint::Unique(_) => {
                        IntegrityViolation::DuplicateRecord(format!("version {}", version.version))
                    }
                    other => other.unknown(),
                })
            })?;
        Ok(())
    }
}
