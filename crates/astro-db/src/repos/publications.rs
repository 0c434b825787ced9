//! Publication repository.

use astro_core::entities::Publication;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::integrity::{Constraint, IntegrityViolation, on_write};
use crate::service::AstroService;

fn row_to_publication(row: &libsql::Row) -> Result<Publication, DatabaseError> {
    Ok(Publication {
        reference: row.get::<String>(0)?,
        bibcode: get_opt_string(row, 1)?,
        doi: get_opt_string(row, 2)?,
        description: get_opt_string(row, 3)?,
    })
}

impl AstroService {
    pub async fn insert_publication(&self, publication: &Publication) -> Result<(), DatabaseError> {
        publication.validate()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO publications (reference, bibcode, doi, description) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    publication.reference.as_str(),
                    publication.bibcode.as_deref(),
                    publication.doi.as_deref(),
                    publication.description.as_deref()
                ],
            )
            .await
            .map_err(|e| {
                on_write(e, |constraint| match constraint {
                    Constraint::Unique(_) => {
                        IntegrityViolation::DuplicatePublication(publication.reference.clone())
                    }
                    other => other.unknown(),
                })
            })?;
        tracing::debug!(reference = %publication.reference, "publication added");
        Ok(())
    }

    pub async fn get_publication(&self, reference: &str) -> Result<Option<Publication>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT reference, bibcode, doi, description FROM publications WHERE reference = ?1",
                [reference],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_publication(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn publication_exists(&self, reference: &str) -> Result<bool, DatabaseError> {
        Ok(self.get_publication(reference).await?.is_some())
    }

    /// Publications whose key, bibcode, DOI or description contains `text`
    /// (case-insensitive). An empty string lists everything.
    pub async fn search_publications(&self, text: &str) -> Result<Vec<Publication>, DatabaseError> {
        let pattern = format!("%{}%", text.trim());
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT reference, bibcode, doi, description FROM publications
                 WHERE reference LIKE ?1 OR bibcode LIKE ?1 OR doi LIKE ?1 OR description LIKE ?1
                 ORDER BY reference",
                [pattern.as_str()],
            )
            .await?;
        let mut publications = Vec::new();
        while let Some(row) = rows.next().await? {
            publications.push(row_to_publication(&row)?);
        }
        Ok(publications)
    }
}
