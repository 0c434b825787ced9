//! Endpoints and credentials of the external services.

use serde::{Deserialize, Serialize};

fn default_sesame_url() -> String {
    "https://cds.unistra.fr/cgi-bin/nph-sesame/-oxI/S".to_string()
}

const fn default_true() -> bool {
    true
}

/// SIMBAD name resolution through the CDS Sesame service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimbadConfig {
    /// Set to `false` to skip the resolver stage entirely.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sesame endpoint; the URL-encoded name is appended as the query string.
    #[serde(default = "default_sesame_url")]
    pub sesame_url: String,
}

impl Default for SimbadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sesame_url: default_sesame_url(),
        }
    }
}

fn default_ads_url() -> String {
    "https://api.adsabs.harvard.edu/v1/search/query".to_string()
}

/// NASA ADS search API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdsConfig {
    /// API token. Also read from the `ADS_TOKEN` environment variable.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_ads_url")]
    pub api_url: String,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_ads_url(),
        }
    }
}

impl AdsConfig {
    /// Returns `true` if a token is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

fn default_svo_url() -> String {
    "http://svo2.cab.inta-csic.es/svo/theory/fps3/fps.php".to_string()
}

/// SVO Filter Profile Service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SvoConfig {
    #[serde(default = "default_svo_url")]
    pub base_url: String,
}

impl Default for SvoConfig {
    fn default() -> Self {
        Self {
            base_url: default_svo_url(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("astrodb/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ads_needs_a_token() {
        let mut ads = AdsConfig::default();
        assert!(!ads.is_configured());
        ads.token = "   ".into();
        assert!(!ads.is_configured());
        ads.token = "abc123".into();
        assert!(ads.is_configured());
    }

    #[test]
    fn simbad_is_enabled_by_default() {
        let simbad = SimbadConfig::default();
        assert!(simbad.enabled);
        assert!(simbad.sesame_url.starts_with("https://cds.unistra.fr"));
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(HttpConfig::default().user_agent.starts_with("astrodb/"));
    }
}
