use anyhow::Context;
use astro_config::AstroConfig;
use astro_core::errors::ExternalError;
use astro_core::services::{
    Article, BibQuery, BibliographicResolver, FilterProfile, FilterProfileSource, LinkChecker,
    NameResolver, Offline, ResolvedObject,
};
use astro_db::AstroService;
use astro_remote::RemoteClient;

use crate::cli::GlobalFlags;

/// External services for this run: the HTTP clients, or `--offline` stand-ins.
pub enum Services {
    Remote(RemoteClient),
    Offline(Offline),
}

impl NameResolver for Services {
    async fn resolve(&self, name: &str) -> Result<Option<ResolvedObject>, ExternalError> {
        match self {
            Self::Remote(client) => client.resolve(name).await,
            Self::Offline(offline) => offline.resolve(name).await,
        }
    }
}

impl BibliographicResolver for Services {
    fn is_available(&self) -> bool {
        match self {
            Self::Remote(client) => client.is_available(),
            Self::Offline(offline) => offline.is_available(),
        }
    }

    async fn lookup(&self, query: &BibQuery) -> Result<Vec<Article>, ExternalError> {
        match self {
            Self::Remote(client) => client.lookup(query).await,
            Self::Offline(offline) => offline.lookup(query).await,
        }
    }
}

impl FilterProfileSource for Services {
    async fn fetch(
        &self,
        telescope: &str,
        instrument: &str,
        filter: &str,
    ) -> Result<FilterProfile, ExternalError> {
        match self {
            Self::Remote(client) => client.fetch(telescope, instrument, filter).await,
            Self::Offline(offline) => offline.fetch(telescope, instrument, filter).await,
        }
    }
}

impl LinkChecker for Services {
    async fn status(&self, url: &str) -> Result<u16, ExternalError> {
        match self {
            Self::Remote(client) => client.status(url).await,
            Self::Offline(offline) => offline.status(url).await,
        }
    }
}

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AstroService,
    pub config: AstroConfig,
    pub services: Services,
}

impl AppContext {
    /// Open the catalogue named by `--db` or the configuration, and build
    /// the service clients.
    pub async fn init(mut config: AstroConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(path) = &flags.db {
            config.database.path.clone_from(path);
        }

        let service = AstroService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open {}", config.database.path))?;

        let services = if flags.offline {
            tracing::info!("offline: SIMBAD, ADS and SVO will not be contacted");
            Services::Offline(Offline)
        } else {
            warn_unconfigured(&config);
            Services::Remote(
                RemoteClient::new(&config).context("failed to build the HTTP client")?,
            )
        };

        Ok(Self {
            service,
            config,
            services,
        })
    }
}

fn warn_unconfigured(config: &AstroConfig) {
    if !config.ads.is_configured() {
        tracing::warn!("no ADS token configured; publications must be given a reference key");
    }
    if !config.simbad.enabled {
        tracing::warn!("SIMBAD lookups are disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(db: &str) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            db: Some(db.to_string()),
            offline: true,
        }
    }

    #[tokio::test]
    async fn db_flag_overrides_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.sqlite");
        let path = path.to_string_lossy();

        let ctx = AppContext::init(AstroConfig::default(), &flags(&path))
            .await
            .unwrap();
        assert_eq!(ctx.config.database.path, path);
        assert!(matches!(ctx.services, Services::Offline(_)));
        assert!(std::path::Path::new(path.as_ref()).exists());
    }

    #[tokio::test]
    async fn offline_services_resolve_nothing() {
        let services = Services::Offline(Offline);
        assert_eq!(services.resolve("TWA 27").await, Ok(None));
        assert!(!services.is_available());
        assert_eq!(services.status("https://example.org/a.fits").await, Ok(200));
    }
}
