//! # astro-config
//!
//! Layered configuration loading for astrodb using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ASTRODB_*` prefix, `__` as separator)
//! 2. The legacy `ADS_TOKEN` variable, mapped to `ads.token`
//! 3. Project-level `.astrodb/config.toml`
//! 4. User-level `~/.config/astrodb/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `ASTRODB_DATABASE__PATH` -> `database.path`,
//! `ASTRODB_INGEST__SEARCH_RADIUS_ARCSEC` -> `ingest.search_radius_arcsec`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use astro_config::AstroConfig;
//!
//! let config = AstroConfig::load_with_dotenv().expect("config");
//! if config.ads.is_configured() {
//!     println!("ADS lookups enabled");
//! }
//! ```

mod database;
mod error;
mod ingest;
mod services;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use ingest::IngestConfig;
pub use services::{AdsConfig, HttpConfig, SimbadConfig, SvoConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".astrodb/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AstroConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub simbad: SimbadConfig,
    #[serde(default)]
    pub ads: AdsConfig,
    #[serde(default)]
    pub svo: SvoConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl AstroConfig {
    /// Load configuration from TOML files and environment variables, then
    /// check the values.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory first, then [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the provider chain. Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::raw().only(&["ADS_TOKEN"]).map(|_| "ads.token".into()))
            .merge(Env::prefixed("ASTRODB_").split("__"))
    }

    /// Reject values no operation could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.ingest.search_radius_arcsec;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "ingest.search_radius_arcsec".into(),
                reason: format!("must be a positive number of arcseconds, got {radius}"),
            });
        }
        if self.ingest.spectra_duplicate_keys.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ingest.spectra_duplicate_keys".into(),
                reason: "at least one column is needed to detect duplicates".into(),
            });
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".into(),
                reason: "must be at least one second".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("astrodb").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AstroConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.ads.is_configured());
        assert_eq!(config.database.path, "astrodb.sqlite");
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let mut config = AstroConfig::default();
        config.ingest.search_radius_arcsec = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ingest.search_radius_arcsec"));
    }

    #[test]
    fn empty_duplicate_key_set_is_rejected() {
        let mut config = AstroConfig::default();
        config.ingest.spectra_duplicate_keys.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn blank_database_path_is_not_configured() {
        let mut config = AstroConfig::default();
        config.database.path = " ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
