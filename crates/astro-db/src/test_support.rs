//! Shared test utilities for astro-db unit tests.

use std::collections::HashMap;

use astro_core::entities::{Publication, Source};
use astro_core::errors::ExternalError;
use astro_core::services::{
    Article, BibQuery, BibliographicResolver, FilterProfile, FilterProfileSource, LinkChecker,
    NameResolver, ResolvedObject,
};

use crate::service::AstroService;

/// In-memory service with the `Ref1` publication already present.
pub async fn test_service() -> AstroService {
    let svc = AstroService::new_local(":memory:").await.unwrap();
    svc.insert_publication(&Publication::keyed("Ref1"))
        .await
        .unwrap();
    svc
}

pub fn source(name: &str, ra_deg: f64, dec_deg: f64) -> Source {
    Source {
        source: name.to_string(),
        ra_deg: Some(ra_deg),
        dec_deg: Some(dec_deg),
        epoch_year: Some(2000.0),
        equinox: Some("J2000".into()),
        shortname: None,
        reference: "Ref1".into(),
        other_references: None,
        comments: None,
    }
}

/// Name resolver answering from a fixed table.
#[derive(Default)]
pub struct TableResolver {
    objects: HashMap<String, ResolvedObject>,
}

impl TableResolver {
    pub fn with(mut self, name: &str, main_id: &str, ra_deg: f64, dec_deg: f64, ids: &[&str]) -> Self {
        self.objects.insert(
            name.to_string(),
            ResolvedObject {
                main_id: main_id.to_string(),
                ra_deg,
                dec_deg,
                identifiers: ids.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }
}

impl NameResolver for TableResolver {
    async fn resolve(&self, name: &str) -> Result<Option<ResolvedObject>, ExternalError> {
        Ok(self.objects.get(name).cloned())
    }
}

/// Resolver that is always down.
pub struct DownResolver;

impl NameResolver for DownResolver {
    async fn resolve(&self, _name: &str) -> Result<Option<ResolvedObject>, ExternalError> {
        Err(ExternalError::Unreachable {
            service: "SIMBAD",
            reason: "connection refused".into(),
        })
    }
}

/// Filter service with one profile.
pub struct FixedProfile(pub FilterProfile);

impl FilterProfileSource for FixedProfile {
    async fn fetch(
        &self,
        _telescope: &str,
        _instrument: &str,
        _filter: &str,
    ) -> Result<FilterProfile, ExternalError> {
        Ok(self.0.clone())
    }
}

/// Link checker answering one status for every URL except those listed as missing.
pub struct Links {
    pub missing: Vec<&'static str>,
}

impl LinkChecker for Links {
    async fn status(&self, url: &str) -> Result<u16, ExternalError> {
        Ok(if self.missing.contains(&url) { 404 } else { 200 })
    }
}

/// Bibliographic service returning the same hits for every query, and
/// remembering the last query it saw.
#[derive(Default)]
pub struct Articles {
    pub hits: Vec<Article>,
    pub last: std::sync::Mutex<Option<BibQuery>>,
}

impl Articles {
    pub fn of(hits: Vec<Article>) -> Self {
        Self {
            hits,
            last: std::sync::Mutex::default(),
        }
    }

    pub fn last_query(&self) -> Option<BibQuery> {
        self.last.lock().unwrap().clone()
    }
}

impl BibliographicResolver for Articles {
    fn is_available(&self) -> bool {
        true
    }

    async fn lookup(&self, query: &BibQuery) -> Result<Vec<Article>, ExternalError> {
        *self.last.lock().unwrap() = Some(query.clone());
        Ok(self.hits.clone())
    }
}

pub fn article(bibcode: &str, first_author: &str, year: &str) -> Article {
    Article {
        bibcode: bibcode.to_string(),
        title: Some("A census of young brown dwarfs".into()),
        first_author: first_author.to_string(),
        year: year.to_string(),
        doi: Some("10.3847/1538-3881/abc".into()),
    }
}
