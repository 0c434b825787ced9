//! # astro-core
//!
//! Domain types and pure rules shared by every astrodb crate.
//!
//! - Record structs for each catalogue table (sources, names, publications, ...)
//! - Vocabulary enums (regimes, match stages, companion relationships)
//! - Pre-insert field validation returning typed [`validation::ValidationError`]s
//! - The source resolution state machine and batch report counters
//! - Service boundaries for the name resolver, ADS, and the SVO filter service
//! - UCD band assignment from effective wavelength

pub mod coords;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod names;
pub mod observer;
pub mod reports;
pub mod resolution;
pub mod services;
pub mod ucd;
pub mod validation;
