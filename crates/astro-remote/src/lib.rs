//! # astro-remote
//!
//! HTTP clients for the external services astrodb consults during ingest:
//! - CDS Sesame, for SIMBAD name resolution ([`astro_core::services::NameResolver`])
//! - NASA ADS, for publication metadata ([`astro_core::services::BibliographicResolver`])
//! - SVO Filter Profile Service, for passband properties ([`astro_core::services::FilterProfileSource`])
//! - plain `HEAD` requests, for spectrum links ([`astro_core::services::LinkChecker`])
//!
//! Every call is a single request with the configured timeout. Failures are
//! reported as [`astro_core::errors::ExternalError`] and never retried.

pub mod ads;
pub mod links;
pub mod sesame;
pub mod svo;

mod error;
mod http;

pub use error::RemoteError;

use std::time::Duration;

use astro_config::{AdsConfig, AstroConfig, SimbadConfig, SvoConfig};

/// HTTP client for every external service.
pub struct RemoteClient {
    http: reqwest::Client,
    simbad: SimbadConfig,
    ads: AdsConfig,
    svo: SvoConfig,
}

impl RemoteClient {
    /// Build a client from the service sections of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(config: &AstroConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            simbad: config.simbad.clone(),
            ads: config.ads.clone(),
            svo: config.svo.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_defaults() {
        assert!(RemoteClient::new(&AstroConfig::default()).is_ok());
    }
}
