//! Repository modules implementing reads and writes for every catalogue table.
//!
//! Each module adds methods to `AstroService` via `impl AstroService` blocks.
//! Writes validate the record first; constraint failures come back as
//! `DatabaseError::Integrity`.

pub mod astrometry;
pub mod checks;
pub mod companions;
pub mod filters;
pub mod instruments;
pub mod parameters;
pub mod photometry;
pub mod publications;
pub mod sources;
pub mod spectra;
