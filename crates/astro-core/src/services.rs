//! Boundaries to the external services the ingest paths consult.
//!
//! The store-facing code is generic over these traits so it can run against
//! the HTTP clients in `astro-remote` or against in-process fakes. [`Offline`]
//! implements all of them for runs without network access.

use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::coords::SkyPosition;
use crate::errors::ExternalError;

/// An object known to the name resolver.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResolvedObject {
    /// Resolver's main identifier, already stripped of catalogue prefixes.
    pub main_id: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// Alternate identifiers, same formatting as `main_id`.
    pub identifiers: Vec<String>,
}

impl ResolvedObject {
    /// Main identifier followed by every distinct alternate identifier.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        let mut names = vec![self.main_id.as_str()];
        for id in &self.identifiers {
            if !names.contains(&id.as_str()) {
                names.push(id);
            }
        }
        names
    }

    #[must_use]
    pub const fn position(&self) -> SkyPosition {
        SkyPosition {
            ra_deg: self.ra_deg,
            dec_deg: self.dec_deg,
        }
    }
}

/// Identifier submitted to the bibliographic service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BibQuery {
    Bibcode(String),
    Doi(String),
    Arxiv(String),
}

impl BibQuery {
    /// Field name used by the ADS search syntax.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Bibcode(_) => "bibcode",
            Self::Doi(_) => "doi",
            Self::Arxiv(_) => "identifier",
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Bibcode(v) | Self::Doi(v) | Self::Arxiv(v) => v,
        }
    }
}

/// Bibliographic metadata of one article.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Article {
    pub bibcode: String,
    pub title: Option<String>,
    /// `Surname, Given` as reported by the service.
    pub first_author: String,
    pub year: String,
    pub doi: Option<String>,
}

impl Article {
    /// Short reference key: four letters of the first author's surname
    /// followed by the last two digits of the year, e.g. `Smit21`.
    #[must_use]
    pub fn reference_key(&self) -> String {
        let stub: String = self
            .first_author
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .take(4)
            .collect();
        let year: Vec<char> = self.year.trim().chars().collect();
        let short_year: String = year[year.len().saturating_sub(2)..].iter().collect();
        format!("{stub}{short_year}")
    }
}

/// Filter properties from the SVO Filter Profile Service, in angstroms.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FilterProfile {
    /// Service identifier, `telescope/instrument.filter`.
    pub filter_id: String,
    pub effective_wavelength_angstroms: f64,
    pub fwhm_angstroms: Option<f64>,
    pub width_effective_angstroms: f64,
}

/// Free-text name to astronomical object.
pub trait NameResolver {
    /// `Ok(None)` when the service knows no object by that name.
    fn resolve(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ResolvedObject>, ExternalError>> + Send;
}

/// DOI, bibcode, or arXiv id to article metadata.
pub trait BibliographicResolver {
    /// Whether lookups can be made at all (credential present).
    fn is_available(&self) -> bool;

    fn lookup(
        &self,
        query: &BibQuery,
    ) -> impl Future<Output = Result<Vec<Article>, ExternalError>> + Send;
}

/// Telescope/instrument/filter triple to passband properties.
pub trait FilterProfileSource {
    fn fetch(
        &self,
        telescope: &str,
        instrument: &str,
        filter: &str,
    ) -> impl Future<Output = Result<FilterProfile, ExternalError>> + Send;
}

/// HTTP status of a URL, via a HEAD request.
pub trait LinkChecker {
    fn status(&self, url: &str) -> impl Future<Output = Result<u16, ExternalError>> + Send;
}

/// Stand-in for every service when running without network access.
///
/// Resolves nothing, has no bibliographic credential, fails filter lookups,
/// and treats every link as reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl NameResolver for Offline {
    async fn resolve(&self, _name: &str) -> Result<Option<ResolvedObject>, ExternalError> {
        Ok(None)
    }
}

impl BibliographicResolver for Offline {
    fn is_available(&self) -> bool {
        false
    }

    async fn lookup(&self, _query: &BibQuery) -> Result<Vec<Article>, ExternalError> {
        Err(ExternalError::NotConfigured { service: "ADS" })
    }
}

impl FilterProfileSource for Offline {
    async fn fetch(
        &self,
        _telescope: &str,
        _instrument: &str,
        _filter: &str,
    ) -> Result<FilterProfile, ExternalError> {
        Err(ExternalError::NotConfigured { service: "SVO" })
    }
}

impl LinkChecker for Offline {
    async fn status(&self, _url: &str) -> Result<u16, ExternalError> {
        Ok(200)
    }
}
