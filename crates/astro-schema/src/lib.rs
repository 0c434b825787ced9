//! # astro-schema
//!
//! Declarative description of the astrodb catalogue and the artefacts built
//! from it.
//!
//! - [`manifest`]: every table, column, index, and constraint of the store
//! - [`docs`]: one Markdown page per table
//! - [`erd`]: a Mermaid entity-relation diagram
//! - [`registry`]: JSON Schemas of the `astro-core` records, with validation
//!
//! Rendering is pure: the manifest goes in, text comes out. The migration in
//! `astro-db` is checked against the manifest by that crate's tests.

pub mod docs;
pub mod erd;
pub mod error;
pub mod manifest;
pub mod registry;

pub use error::SchemaError;
pub use manifest::{Column, Constraint, ConstraintKind, Datatype, Index, TABLES, Table};
pub use registry::SchemaRegistry;
