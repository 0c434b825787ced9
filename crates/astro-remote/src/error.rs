//! Remote service error types.

use astro_core::errors::ExternalError;
use thiserror::Error;

/// Errors that can occur when talking to an external service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Failed to parse a service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A quantity came back in a unit other than the one asked for.
    #[error("{quantity} is reported in {unit}")]
    Unit { quantity: String, unit: String },

    /// The service answered but knows nothing under that identifier.
    #[error("not found: {0}")]
    NotFound(String),
}

impl RemoteError {
    /// Attach the service name and convert into the error type the ingest
    /// operations understand.
    #[must_use]
    pub fn into_external(self, service: &'static str) -> ExternalError {
        match self {
            Self::Http(err) => match err.status() {
                Some(status) => ExternalError::Status {
                    service,
                    status: status.as_u16(),
                },
                None => ExternalError::Unreachable {
                    service,
                    reason: err.to_string(),
                },
            },
            Self::Api { status, .. } => ExternalError::Status { service, status },
            Self::Parse(reason) => ExternalError::Malformed { service, reason },
            Self::Unit { quantity, unit } => ExternalError::UnitMismatch { quantity, unit },
            Self::NotFound(query) => ExternalError::NotFound { service, query },
        }
    }
}

impl From<quick_xml::Error> for RemoteError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
