//! Service layer over the catalogue store.
//!
//! `AstroService` wraps `AstroDb`. Repository methods live in [`crate::repos`]
//! and ingest operations in [`crate::ingest`], all as `impl AstroService`.

use crate::AstroDb;
use crate::error::DatabaseError;

pub struct AstroService {
    db: AstroDb,
}

impl AstroService {
    /// Open (and migrate) a local catalogue.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = AstroDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `AstroDb`.
    #[must_use]
    pub const fn from_db(db: AstroDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &AstroDb {
        &self.db
    }
}
