//! Publication ingest, with optional metadata lookup.

use astro_core::entities::Publication;
use astro_core::errors::ExternalError;
use astro_core::services::{BibQuery, BibliographicResolver};
use astro_core::validation::ValidationError;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::helpers::non_blank;
use crate::service::AstroService;

/// What the caller knows about a publication. At least one of reference,
/// bibcode and DOI must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationRequest {
    pub reference: Option<String>,
    /// Also accepts arXiv identifiers such as `arXiv:2101.00001`.
    pub bibcode: Option<String>,
    pub doi: Option<String>,
    pub description: Option<String>,
    /// Skip the bibliographic service even when it is available.
    #[serde(default)]
    pub ignore_ads: bool,
}

impl PublicationRequest {
    fn query(&self) -> Option<BibQuery> {
        if let Some(bibcode) = self.bibcode.as_deref().and_then(non_blank) {
            return Some(if bibcode.contains("arXiv") {
                BibQuery::Arxiv(bibcode.to_string())
            } else {
                BibQuery::Bibcode(bibcode.to_string())
            });
        }
        self.doi
            .as_deref()
            .and_then(non_blank)
            .map(|doi| BibQuery::Doi(doi.to_string()))
    }

    fn without_lookup(&self) -> Result<Publication, IngestError> {
        let reference = self
            .reference
            .as_deref()
            .and_then(non_blank)
            .ok_or(ValidationError::Missing { field: "reference" })?;
        Ok(Publication {
            reference: reference.to_string(),
            bibcode: self.bibcode.clone(),
            doi: self.doi.clone(),
            description: self.description.clone(),
        })
    }
}

impl AstroService {
    /// Add a publication, filling in what the bibliographic service knows
    /// about it when one is available.
    pub async fn ingest_publication<B: BibliographicResolver>(
        &self,
        request: &PublicationRequest,
        ads: &B,
    ) -> Result<Publication, IngestError> {
        let given = [&request.reference, &request.bibcode, &request.doi]
            .into_iter()
            .any(|field| field.as_deref().and_then(non_blank).is_some());
        if !given {
            return Err(ValidationError::Missing {
                field: "reference, bibcode or doi",
            }
            .into());
        }

        let use_ads = ads.is_available() && !request.ignore_ads;
        let publication = match request.query() {
            Some(query) if use_ads => self.looked_up(request, ads, &query).await?,
            _ => request.without_lookup()?,
        };

        self.insert_publication(&publication).await?;
        tracing::info!(reference = %publication.reference, "publication added");
        Ok(publication)
    }

    async fn looked_up<B: BibliographicResolver>(
        &self,
        request: &PublicationRequest,
        ads: &B,
        query: &BibQuery,
    ) -> Result<Publication, IngestError> {
        let external = |source| IngestError::External {
            name: query.value().to_string(),
            source,
        };
        let mut hits = ads.lookup(query).await.map_err(external)?;
        let article = match hits.len() {
            0 => {
                return Err(external(ExternalError::NotFound {
                    service: "ADS",
                    query: format!("{}:{}", query.field(), query.value()),
                }));
            }
            1 => hits.remove(0),
            _ => {
                return Err(IngestError::Ambiguous {
                    name: query.value().to_string(),
                    matches: hits.into_iter().map(|a| a.bibcode).collect(),
                });
            }
        };
        tracing::debug!(bibcode = %article.bibcode, "publication found");

        let reference = request
            .reference
            .as_deref()
            .and_then(non_blank)
            .map_or_else(|| article.reference_key(), ToString::to_string);
        Ok(Publication {
            reference,
            bibcode: Some(article.bibcode),
            doi: article.doi.or_else(|| request.doi.clone()),
            description: request.description.clone().or(article.title),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntegrityViolation;
    use crate::test_support::{Articles, article, test_service};
    use astro_core::services::Offline;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn nothing_to_identify_the_publication() {
        let svc = test_service().await;
        let err = svc
            .ingest_publication(&PublicationRequest::default(), &Offline)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Validation(ValidationError::Missing { .. })));
    }

    #[tokio::test]
    async fn offline_needs_a_reference_key() {
        let svc = test_service().await;
        let request = PublicationRequest {
            doi: Some("10.1086/498708".into()),
            ..PublicationRequest::default()
        };
        let err = svc.ingest_publication(&request, &Offline).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::Validation(ValidationError::Missing { field: "reference" })
        ));

        let request = PublicationRequest {
            reference: Some("Cutr03".into()),
            ..request
        };
        let added = svc.ingest_publication(&request, &Offline).await.unwrap();
        assert_eq!(added.doi.as_deref(), Some("10.1086/498708"));
    }

    #[tokio::test]
    async fn lookup_fills_key_description_and_identifiers() {
        let svc = test_service().await;
        let ads = Articles::of(vec![article("2021AJ....161...42S", "Smith, Jane", "2021")]);
        let request = PublicationRequest {
            bibcode: Some("2021AJ....161...42S".into()),
            ..PublicationRequest::default()
        };

        let added = svc.ingest_publication(&request, &ads).await.unwrap();
        assert_eq!(
            added,
            Publication {
                reference: "Smit21".into(),
                bibcode: Some("2021AJ....161...42S".into()),
                doi: Some("10.3847/1538-3881/abc".into()),
                description: Some("A census of young brown dwarfs".into()),
            }
        );
        assert!(svc.publication_exists("Smit21").await.unwrap());
    }

    #[tokio::test]
    async fn arxiv_identifiers_are_queried_as_such() {
        let svc = test_service().await;
        let ads = Articles::of(vec![article("2021arXiv210100001S", "Smith, Jane", "2021")]);
        let request = PublicationRequest {
            bibcode: Some("arXiv:2101.00001".into()),
            ..PublicationRequest::default()
        };
        svc.ingest_publication(&request, &ads).await.unwrap();
        assert_eq!(
            ads.last_query(),
            Some(BibQuery::Arxiv("arXiv:2101.00001".into()))
        );
    }

    #[tokio::test]
    async fn several_hits_are_ambiguous() {
        let svc = test_service().await;
        let ads = Articles::of(vec![
            article("2021AJ....161...42S", "Smith, Jane", "2021"),
            article("2021AJ....161...43S", "Smith, John", "2021"),
        ]);
        let request = PublicationRequest {
            doi: Some("10.3847/1538-3881/abc".into()),
            ..PublicationRequest::default()
        };
        let err = svc.ingest_publication(&request, &ads).await.unwrap_err();
        assert!(matches!(err, IngestError::Ambiguous { ref matches, .. } if matches.len() == 2));
    }

    #[tokio::test]
    async fn ignore_ads_skips_the_lookup() {
        let svc = test_service().await;
        let ads = Articles::default();
        let request = PublicationRequest {
            reference: Some("Cutr03".into()),
            bibcode: Some("2003yCat.2246....0C".into()),
            ignore_ads: true,
            ..PublicationRequest::default()
        };
        svc.ingest_publication(&request, &ads).await.unwrap();
        assert_eq!(ads.last_query(), None);
    }

    #[tokio::test]
    async fn existing_key_is_reported_as_duplicate() {
        let svc = test_service().await;
        let request = PublicationRequest {
            reference: Some("Ref1".into()),
            ..PublicationRequest::default()
        };
        let err = svc.ingest_publication(&request, &Offline).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::Integrity(IntegrityViolation::DuplicatePublication(ref r)) if r == "Ref1"
        ));
    }
}
