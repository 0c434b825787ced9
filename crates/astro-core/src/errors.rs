//! Cross-cutting error types for astrodb.
//!
//! Store and transport errors (`DatabaseError`, `RemoteError`) live in their
//! own crates. The errors here are the ones every layer can produce: failed
//! field contracts, missing records, and failures of an external service
//! reached through one of the [`crate::services`] boundaries.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can be raised by any astrodb crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A field failed its length, range, or vocabulary contract.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Batch counters do not add up.
    #[error("batch invariant violated: {0}")]
    Invariant(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure of an external service reached through a [`crate::services`] trait.
///
/// Terminal for the item being processed. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalError {
    /// Connection failed or timed out.
    #[error("{service} is unreachable: {reason}")]
    Unreachable { service: &'static str, reason: String },

    /// The service answered with a non-success HTTP status.
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// The response body did not have the expected shape.
    #[error("unexpected {service} response: {reason}")]
    Malformed { service: &'static str, reason: String },

    /// A credential or endpoint needed to reach the service is missing.
    #[error("{service} is not configured")]
    NotConfigured { service: &'static str },

    /// A filter quantity came back in something other than angstroms.
    #[error("{quantity} is reported in {unit}, expected angstroms")]
    UnitMismatch { quantity: String, unit: String },

    /// The service has no record for the query.
    #[error("{service} has no record of {query}")]
    NotFound { service: &'static str, query: String },
}
