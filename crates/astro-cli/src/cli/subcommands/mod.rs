pub mod batch;
pub mod catalogue;
pub mod schema;
pub mod source;

pub use batch::{BatchFileArgs, PhotometryCommands, SpectraCommands};
pub use catalogue::{FilterCommands, InstrumentCommands, PublicationCommands};
pub use schema::SchemaCommands;
pub use source::{SourceCommands, SourceIngestArgs};
