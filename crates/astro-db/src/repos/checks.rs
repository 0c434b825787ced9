//! Read-only data quality checks over the whole catalogue.

use serde::Serialize;

use crate::error::DatabaseError;
use crate::helpers::collect_strings;
use crate::service::AstroService;

/// One row that failed a content check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentViolation {
    pub check: &'static str,
    pub source: String,
    pub detail: String,
}

/// Tables reported by [`AstroService::table_counts`], in dependency order.
pub const COUNTED_TABLES: [&str; 16] = [
    "publications",
    "versions",
    "telescopes",
    "instruments",
    "regimes",
    "photometry_filters",
    "parameter_list",
    "sources",
    "names",
    "photometry",
    "parallaxes",
    "proper_motions",
    "radial_velocities",
    "companion_relationships",
    "modeled_parameters",
    "spectra",
];

struct Check {
    name: &'static str,
    sql: &'static str,
}

const CHECKS: [Check; 7] = [
    Check {
        name: "coordinates",
        sql: "SELECT source, 'missing or out of range: ra=' || COALESCE(ra_deg, 'NULL') || ' dec=' || COALESCE(dec_deg, 'NULL')
              FROM sources
              WHERE ra_deg IS NULL OR dec_deg IS NULL
                 OR ra_deg < 0 OR ra_deg > 360 OR dec_deg < -90 OR dec_deg > 90",
    },
    Check {
        name: "magnitudes",
        sql: "SELECT source, band || ' magnitude ' || COALESCE(magnitude, 'NULL')
              FROM photometry
              WHERE magnitude IS NULL OR magnitude > 100 OR magnitude < -1",
    },
    Check {
        name: "parallax_errors",
        sql: "SELECT source, 'parallax error ' || parallax_error || ' from ' || reference
              FROM parallaxes WHERE parallax_error < 0",
    },
    Check {
        name: "adopted_parallax",
        sql: "SELECT source, COUNT(*) || ' adopted parallaxes'
              FROM parallaxes WHERE adopted = 1 GROUP BY source HAVING COUNT(*) > 1",
    },
    Check {
        name: "adopted_proper_motion",
        sql: "SELECT source, COUNT(*) || ' adopted proper motions'
              FROM proper_motions WHERE adopted = 1 GROUP BY source HAVING COUNT(*) > 1",
    },
    Check {
        name: "adopted_radial_velocity",
        sql: "SELECT source, COUNT(*) || ' adopted radial velocities'
              FROM radial_velocities WHERE adopted = 1 GROUP BY source HAVING COUNT(*) > 1",
    },
    Check {
        name: "sources_without_self_alias",
        sql: "SELECT s.source, 'no names row for the source itself'
              FROM sources s
              LEFT JOIN names n ON n.source = s.source AND n.other_name = s.source
              WHERE n.source IS NULL",
    },
];

impl AstroService {
    /// Run every content check. An empty result means the catalogue is clean.
    pub async fn check_contents(&self) -> Result<Vec<ContentViolation>, DatabaseError> {
        let mut violations = Vec::new();
        for check in &CHECKS {
            let mut rows = self.db().conn().query(check.sql, ()).await?;
            while let Some(row) = rows.next().await? {
                violations.push(ContentViolation {
                    check: check.name,
                    source: row.get::<String>(0)?,
                    detail: row.get::<String>(1)?,
                });
            }
        }
        if violations.is_empty() {
            tracing::info!("content checks passed");
        } else {
            tracing::warn!(count = violations.len(), "content checks found problems");
        }
        Ok(violations)
    }

    /// Row count of every catalogue table.
    pub async fn table_counts(&self) -> Result<Vec<(&'static str, u64)>, DatabaseError> {
        let mut counts = Vec::with_capacity(COUNTED_TABLES.len());
        for table in COUNTED_TABLES {
            let mut rows = self
                .db()
                .conn()
                .query(&format!("SELECT COUNT(*) FROM {table}"), ())
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            let count = u64::try_from(row.get::<i64>(0)?)
                .map_err(|e| DatabaseError::InvalidState(format!("{table} count: {e}")))?;
            counts.push((table, count));
        }
        Ok(counts)
    }

    /// Sources in the catalogue, sorted.
    pub async fn source_names(&self) -> Result<Vec<String>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query("SELECT source FROM sources ORDER BY source", ())
            .await?;
        collect_strings(rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{source, test_service};
    use astro_core::entities::{Parallax, Source};
    use pretty_assertions::assert_eq;

    fn adopted(reference: &str) -> Parallax {
        Parallax {
            source: "V4046 Sgr".into(),
            parallax_mas: 13.8,
            parallax_error: Some(0.1),
            adopted: true,
            comments: None,
            reference: reference.into(),
        }
    }

    #[tokio::test]
    async fn clean_catalogue_has_no_violations() {
        let svc = test_service().await;
        svc.insert_source(&source("V4046 Sgr", 273.54, -32.79))
            .await
            .unwrap();
        assert_eq!(svc.check_contents().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn missing_coordinates_and_double_adoption_are_reported() {
        let svc = test_service().await;
        svc.insert_publication(&astro_core::entities::Publication::keyed("Ref2"))
            .await
            .unwrap();
        svc.insert_source(&Source {
            ra_deg: None,
            dec_deg: None,
            ..source("V4046 Sgr", 0.0, 0.0)
        })
        .await
        .unwrap();
        svc.insert_parallax(&adopted("Ref1")).await.unwrap();
        svc.insert_parallax(&adopted("Ref2")).await.unwrap();

        let checks: Vec<&str> = svc
            .check_contents()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.check)
            .collect();
        assert_eq!(checks, vec!["coordinates", "adopted_parallax"]);
    }

    #[tokio::test]
    async fn counts_cover_every_table() {
        let svc = test_service().await;
        let counts = svc.table_counts().await.unwrap();
        assert_eq!(counts.len(), 16);
        assert!(counts.contains(&("publications", 1)));
        assert!(counts.contains(&("regimes", 11)));
    }
}
