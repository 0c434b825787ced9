//! Classification of constraint failures reported by SQLite.
//!
//! libSQL surfaces constraint failures as plain messages such as
//! `NOT NULL constraint failed: sources.reference`. [`Constraint::of`] parses
//! those; each repo then maps the constraint to an [`IntegrityViolation`]
//! using what it knows about the row it was writing.

use thiserror::Error;

use crate::error::DatabaseError;
use crate::service::AstroService;

/// A write rejected by a constraint of the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("reference is blank: every record needs a publication key")]
    BlankReference,

    #[error("reference {0} does not match any publication; add the publication first")]
    UnknownReference(String),

    #[error("{0} is likely a duplicate name")]
    DuplicateName(String),

    #[error("no source in the database is named {0}")]
    UnknownSource(String),

    #[error("publication {0} already exists")]
    DuplicatePublication(String),

    #[error("{0} is already stored")]
    DuplicateRecord(String),

    #[error("parameter {0} is not in the parameter list")]
    UnknownParameter(String),

    #[error("{column} {value} is not in the database")]
    UnknownValue { column: &'static str, value: String },

    #[error("unexpected integrity error: {0}")]
    Unknown(String),
}

/// Kind of constraint named in a failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `table.column` that was NULL.
    NotNull(String),
    /// Columns of the violated unique or primary key.
    Unique(String),
    ForeignKey,
    Check(String),
}

impl Constraint {
    /// Parse the constraint out of a libSQL error, if it is a constraint failure.
    #[must_use]
    pub fn of(err: &libsql::Error) -> Option<Self> {
        Self::parse(&err.to_string())
    }

    #[must_use]
    pub fn parse(message: &str) -> Option<Self> {
        let detail = |marker: &str| {
            message
                .split_once(marker)
                .map(|(_, rest)| rest.trim().trim_end_matches('`').trim().to_string())
                .unwrap_or_default()
        };

        if message.contains("NOT NULL constraint failed") {
            Some(Self::NotNull(detail("NOT NULL constraint failed:")))
        } else if message.contains("UNIQUE constraint failed") {
            Some(Self::Unique(detail("UNIQUE constraint failed:")))
        } else if message.contains("FOREIGN KEY constraint failed") {
            Some(Self::ForeignKey)
        } else if message.contains("CHECK constraint failed") {
            Some(Self::Check(detail("CHECK constraint failed:")))
        } else {
            None
        }
    }

    /// Fallback mapping when the caller has nothing more specific to say.
    #[must_use]
    pub fn unknown(self) -> IntegrityViolation {
        IntegrityViolation::Unknown(match self {
            Self::NotNull(column) => format!("NOT NULL constraint failed: {column}"),
            Self::Unique(columns) => format!("UNIQUE constraint failed: {columns}"),
            Self::ForeignKey => "FOREIGN KEY constraint failed".to_string(),
            Self::Check(detail) => format!("CHECK constraint failed: {detail}"),
        })
    }
}

/// Convert a failed write into a `DatabaseError`, classifying constraint
/// failures with `classify`.
pub(crate) fn on_write(
    err: libsql::Error,
    classify: impl FnOnce(Constraint) -> IntegrityViolation,
) -> DatabaseError {
    match Constraint::of(&err) {
        Some(constraint) => DatabaseError::Integrity(classify(constraint)),
        None => DatabaseError::LibSql(err),
    }
}

/// A referenced row: `(table, column, value)`. `None` values are skipped.
pub(crate) type Parent<'a> = (&'static str, &'static str, Option<&'a str>);

impl AstroService {
    /// Like [`on_write`], but a foreign key failure is diagnosed by looking
    /// up each parent row in turn.
    pub(crate) async fn classify_write(
        &self,
        err: libsql::Error,
        parents: &[Parent<'_>],
        classify: impl FnOnce(Constraint) -> IntegrityViolation,
    ) -> DatabaseError {
        match Constraint::of(&err) {
            Some(Constraint::ForeignKey) => match self.missing_parent(parents).await {
                Ok(violation) => DatabaseError::Integrity(violation),
                Err(lookup) => lookup,
            },
            Some(constraint) => DatabaseError::Integrity(classify(constraint)),
            None => DatabaseError::LibSql(err),
        }
    }

    async fn missing_parent(&self, parents: &[Parent<'_>]) -> Result<IntegrityViolation, DatabaseError> {
        for &(table, column, value) in parents {
            let Some(value) = value else { continue };
            let mut rows = self
                .db()
                .conn()
                .query(&format!("SELECT 1 FROM {table} WHERE {column} = ?1"), [value])
                .await?;
            if rows.next().await?.is_some() {
                continue;
            }
            let value = value.to_string();
            return Ok(match table {
                "publications" => IntegrityViolation::UnknownReference(value),
                "sources" => IntegrityViolation::UnknownSource(value),
                "parameter_list" => IntegrityViolation::UnknownParameter(value),
                _ => IntegrityViolation::UnknownValue { column, value },
            });
        }
        Ok(Constraint::ForeignKey.unknown())
    }
}
