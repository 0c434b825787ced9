//! Source and alternate-name repository.
//!
//! Every source carries a self alias in `names`, so name lookups only need
//! the `names` table. The exact query still checks `sources` to stay correct
//! for rows written by other tools.

use astro_core::coords::SkyPosition;
use astro_core::entities::{Alias, Source};
use astro_core::names::fuzzy_key;

use crate::error::DatabaseError;
use crate::helpers::{collect_strings, get_opt_f64, get_opt_string, non_blank};
use crate::integrity::{Constraint, IntegrityViolation, on_write};
use crate::service::AstroService;

const SOURCE_COLUMNS: &str =
    "source, ra_deg, dec_deg, epoch_year, equinox, shortname, reference, other_references, comments";

fn row_to_source(row: &libsql::Row) -> Result<Source, DatabaseError> {
    Ok(Source {
        source: row.get::<String>(0)?,
        ra_deg: get_opt_f64(row, 1)?,
        dec_deg: get_opt_f64(row, 2)?,
        epoch_year: get_opt_f64(row, 3)?,
        equinox: get_opt_string(row, 4)?,
        shortname: get_opt_string(row, 5)?,
        reference: row.get::<String>(6)?,
        other_references: get_opt_string(row, 7)?,
        comments: get_opt_string(row, 8)?,
    })
}

fn source_violation(source: &Source, constraint: Constraint) -> IntegrityViolation {
    match constraint {
        Constraint::NotNull(column) if column.ends_with("reference") => {
            IntegrityViolation::BlankReference
        }
        // The only foreign key of `sources` is its reference.
        Constraint::ForeignKey => IntegrityViolation::UnknownReference(source.reference.clone()),
        Constraint::Unique(_) => IntegrityViolation::DuplicateName(source.source.clone()),
        other => other.unknown(),
    }
}

fn alias_violation(alias: &Alias, constraint: Constraint) -> IntegrityViolation {
    match constraint {
        Constraint::ForeignKey => IntegrityViolation::UnknownSource(alias.source.clone()),
        Constraint::Unique(_) => IntegrityViolation::DuplicateName(alias.other_name.clone()),
        other => other.unknown(),
    }
}

async fn write_source(conn: &libsql::Connection, source: &Source) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO sources (source, ra_deg, dec_deg, epoch_year, equinox, shortname, reference, other_references, comments)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        libsql::params![
            source.source.as_str(),
            source.ra_deg,
            source.dec_deg,
            source.epoch_year,
            source.equinox.as_deref(),
            source.shortname.as_deref(),
            non_blank(&source.reference),
            source.other_references.as_deref(),
            source.comments.as_deref()
        ],
    )
    .await
    .map_err(|e| on_write(e, |c| source_violation(source, c)))?;

    let alias = Alias {
        source: source.source.clone(),
        other_name: source.source.clone(),
    };
    write_alias(conn, &alias).await
}

async fn write_alias(conn: &libsql::Connection, alias: &Alias) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO names (source, other_name, name_key) VALUES (?1, ?2, ?3)",
        libsql::params![
            alias.source.as_str(),
            alias.other_name.as_str(),
            fuzzy_key(&alias.other_name)
        ],
    )
    .await
    .map_err(|e| on_write(e, |c| alias_violation(alias, c)))?;
    Ok(())
}

impl AstroService {
    /// Insert a source and its self alias in one transaction.
    ///
    /// A blank reference is bound as NULL so the store reports it as
    /// [`IntegrityViolation::BlankReference`]. Nothing is written on failure.
    pub async fn insert_source(&self, source: &Source) -> Result<(), DatabaseError> {
        source.validate()?;

        let tx = self.db().conn().transaction().await?;
        match write_source(&tx, source).await {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        }
        tracing::debug!(source = %source.source, "source added with self alias");
        Ok(())
    }

    pub async fn get_source(&self, name: &str) -> Result<Option<Source>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SOURCE_COLUMNS} FROM sources WHERE source = ?1"),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_source(&row)?)),
            None => Ok(None),
        }
    }

    /// Add an alternate name for an existing source.
    pub async fn add_alias(&self, alias: &Alias) -> Result<(), DatabaseError> {
        alias.validate()?;
        write_alias(self.db().conn(), alias).await?;
        tracing::debug!(source = %alias.source, alias = %alias.other_name, "alias added");
        Ok(())
    }

    pub async fn alias_exists(&self, source: &str, other_name: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM names WHERE source = ?1 AND other_name = ?2",
                [source, other_name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    pub async fn aliases_of(&self, source: &str) -> Result<Vec<String>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                "SELECT other_name FROM names WHERE source = ?1 ORDER BY other_name",
                [source],
            )
            .await?;
        collect_strings(rows).await
    }

    /// Sources whose canonical name or one of whose aliases equals `name`.
    pub async fn exact_matches(&self, name: &str) -> Result<Vec<String>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                "SELECT source FROM sources WHERE source = ?1
                 UNION
                 SELECT source FROM names WHERE other_name = ?1",
                [name],
            )
            .await?;
        collect_strings(rows).await
    }

    /// Exact matches for any of several names, e.g. a resolver's identifier set.
    pub async fn exact_matches_any(&self, names: &[&str]) -> Result<Vec<String>, DatabaseError> {
        let mut found = Vec::new();
        for name in names {
            for source in self.exact_matches(name).await? {
                if !found.contains(&source) {
                    found.push(source);
                }
            }
        }
        Ok(found)
    }

    /// Sources with an alias equal to `name` once case, spacing and
    /// punctuation are ignored.
    pub async fn fuzzy_matches(&self, name: &str) -> Result<Vec<String>, DatabaseError> {
        let key = fuzzy_key(name);
        if key.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT source FROM names WHERE name_key = ?1",
                [key.as_str()],
            )
            .await?;
        collect_strings(rows).await
    }

    /// Sources within `radius_arcsec` of `position`.
    ///
    /// Candidates are narrowed on the declination index, then filtered on the
    /// true angular separation.
    pub async fn cone_search(
        &self,
        position: SkyPosition,
        radius_arcsec: f64,
    ) -> Result<Vec<String>, DatabaseError> {
        let (low, high) = position.dec_window(radius_arcsec);
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT source, ra_deg, dec_deg FROM sources
                 WHERE ra_deg IS NOT NULL AND dec_deg BETWEEN ?1 AND ?2",
                libsql::params![low, high],
            )
            .await?;

        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            let other = SkyPosition {
                ra_deg: row.get::<f64>(1)?,
                dec_deg: row.get::<f64>(2)?,
            };
            if position.separation_arcsec(&other) <= radius_arcsec {
                found.push(row.get::<String>(0)?);
            }
        }
        Ok(found)
    }
}
