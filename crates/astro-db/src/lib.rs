//! # astro-db
//!
//! libSQL store for the astrodb catalogue.
//!
//! Holds sources, their alternate names, publications, telescopes and
//! instruments, photometry filters, and the measurement tables. All repository
//! methods are implemented on [`service::AstroService`]; the ingest operations
//! in [`ingest`] drive them through the source resolution chain.
//!
//! Uses the `libsql` crate (C `SQLite` fork) as an embedded local database.

pub mod error;
pub mod helpers;
pub mod ingest;
pub mod integrity;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

pub use error::{DatabaseError, IngestError};
pub use integrity::IntegrityViolation;
pub use service::AstroService;

use libsql::Builder;

/// Database handle for the catalogue.
///
/// Wraps a libSQL database and its single connection.
pub struct AstroDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AstroDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let astro_db = Self { db, conn };
        astro_db.run_migrations().await?;
        tracing::debug!(path, "catalogue opened");
        Ok(astro_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
