//! Companion relationship repository.

use astro_core::entities::CompanionRelationship;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_f64, get_opt_string, parse_enum};
use crate::integrity::{Constraint, IntegrityViolation};
use crate::service::AstroService;

fn row_to_companion(row: &libsql::Row) -> Result<CompanionRelationship, DatabaseError> {
    Ok(CompanionRelationship {
        source: row.get::<String>(0)?,
        companion_name: row.get::<String>(1)?,
        relationship: parse_enum(&row.get::<String>(2)?)?,
        projected_separation_arcsec: get_opt_f64(row, 3)?,
        projected_separation_error: get_opt_f64(row, 4)?,
        comments: get_opt_string(row, 5)?,
        reference: get_opt_string(row, 6)?,
    })
}

impl AstroService {
    pub async fn insert_companion(&self, companion: &CompanionRelationship) -> Result<(), DatabaseError> {
        companion.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO companion_relationships
                 (source, companion_name, relationship, projected_separation_arcsec, projected_separation_error, comments, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    companion.source.as_str(),
                    companion.companion_name.as_str(),
                    companion.relationship.as_str(),
                    companion.projected_separation_arcsec,
                    companion.projected_separation_error,
                    companion.comments.as_deref(),
                    companion.reference.as_deref()
                ],
            )
            .await;
        if let Err(e) = result {
            let parents = [
                ("sources", "source", Some(companion.source.as_str())),
                ("publications", "reference", companion.reference.as_deref()),
            ];
            return Err(self
                .classify_write(e, &parents, |c| match c {
                    Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(format!(
                        "companion {} of {}",
                        companion.companion_name, companion.source
                    )),
                    other => other.unknown(),
                })
                .await);
        }
        Ok(())
    }

    pub async fn companions_of(&self, source: &str) -> Result<Vec<CompanionRelationship>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT source, companion_name, relationship, projected_separation_arcsec,
                        projected_separation_error, comments, reference
                 FROM companion_relationships WHERE source = ?1 ORDER BY companion_name",
                [source],
            )
            .await?;
        let mut companions = Vec::new();
        while let Some(row) = rows.next().await? {
            companions.push(row_to_companion(&row)?);
        }
        Ok(companions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{source, test_service};
    use astro_core::enums::Relationship;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn relationship_label_round_trips() {
        let svc = test_service().await;
        svc.insert_source(&source("TWA 27", 181.88, -39.55))
            .await
            .unwrap();
        let companion = CompanionRelationship {
            source: "TWA 27".into(),
            companion_name: "TWA 27b".into(),
            relationship: Relationship::UnresolvedParent,
            projected_separation_arcsec: Some(0.78),
            projected_separation_error: None,
            comments: None,
            reference: Some("Ref1".into()),
        };
        svc.insert_companion(&companion).await.unwrap();
        assert_eq!(svc.companions_of("TWA 27").await.unwrap(), vec![companion]);
    }
}
