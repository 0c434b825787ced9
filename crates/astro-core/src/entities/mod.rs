//! Record structs for the catalogue tables.
//!
//! Each struct maps to one table of the libSQL schema and knows how to check
//! its own field contracts before it is written.

mod astrometry;
mod companion;
mod filter;
mod instrument;
mod parameter;
mod photometry;
mod publication;
mod source;
mod spectrum;
mod version;

pub use astrometry::{Parallax, ProperMotion, RadialVelocity};
pub use companion::CompanionRelationship;
pub use filter::PhotometryFilter;
pub use instrument::{Instrument, Telescope};
pub use parameter::{ModeledParameter, Parameter};
pub use photometry::Photometry;
pub use publication::Publication;
pub use source::{Alias, Source, SourceCandidate};
pub use spectrum::{Spectrum, parse_observation_date};
pub use version::Version;
