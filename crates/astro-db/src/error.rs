//! Error types for astro-db.

use astro_core::errors::ExternalError;
use astro_core::validation::ValidationError;
use thiserror::Error;

use crate::integrity::IntegrityViolation;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A record was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected a write on a constraint.
    #[error(transparent)]
    Integrity(IntegrityViolation),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from the ingest operations.
///
/// Every variant except `Database` and `Invariant` is scoped to one item.
/// Batch operations turn item errors into skips unless the configured policy
/// says to abort.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Integrity(IntegrityViolation),

    #[error("{name} matches {} existing sources: {}", .matches.len(), .matches.join(", "))]
    Ambiguous { name: String, matches: Vec<String> },

    #[error("no source in the database is named {0}")]
    UnknownSource(String),

    #[error("{name}: {source}")]
    External { name: String, source: ExternalError },

    #[error("no coordinates for {name}: none were supplied and the resolver has none")]
    MissingCoordinates { name: String },

    #[error("{url} is not accessible (HTTP {status})")]
    Inaccessible { url: String, status: u16 },

    #[error(transparent)]
    Database(DatabaseError),

    #[error("batch invariant violated: {0}")]
    Invariant(String),
}

impl IngestError {
    /// Whether the error concerns a single item rather than the store or the batch.
    #[must_use]
    pub const fn is_item_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Invariant(_))
    }
}

impl From<DatabaseError> for IngestError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Validation(e) => Self::Validation(e),
            DatabaseError::Integrity(v) => Self::Integrity(v),
            other => Self::Database(other),
        }
    }
}

impl From<libsql::Error> for IngestError {
    fn from(err: libsql::Error) -> Self {
        Self::Database(DatabaseError::LibSql(err))
    }
}
