//! NASA ADS search API client.

use astro_core::errors::ExternalError;
use astro_core::services::{Article, BibQuery, BibliographicResolver};
use serde::Deserialize;

use crate::error::RemoteError;
use crate::http::check_response;
use crate::RemoteClient;

const SERVICE: &str = "ADS";
const FIELDS: &str = "bibcode,title,first_author,year,doi";

#[derive(Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Deserialize)]
struct SearchBody {
    docs: Vec<Doc>,
}

/// ADS returns `title` and `doi` as arrays.
#[derive(Deserialize)]
struct Doc {
    bibcode: String,
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    first_author: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    doi: Vec<String>,
}

impl From<Doc> for Article {
    fn from(doc: Doc) -> Self {
        Self {
            bibcode: doc.bibcode,
            title: doc.title.into_iter().next(),
            first_author: doc.first_author,
            year: doc.year,
            doi: doc.doi.into_iter().next(),
        }
    }
}

/// Search query string, e.g. `doi:"10.1086/498708"`.
#[must_use]
pub fn query_string(query: &BibQuery) -> String {
    format!("{}:\"{}\"", query.field(), query.value())
}

fn parse_articles(body: &str) -> Result<Vec<Article>, RemoteError> {
    let data: SearchResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))?;
    Ok(data.response.docs.into_iter().map(Article::from).collect())
}

impl RemoteClient {
    async fn search_ads(&self, query: &BibQuery) -> Result<Vec<Article>, RemoteError> {
        let url = format!(
            "{}?q={}&fl={FIELDS}",
            self.ads.api_url,
            urlencoding::encode(&query_string(query))
        );
        let resp = check_response(
            self.http
                .get(&url)
                .bearer_auth(self.ads.token.trim())
                .send()
                .await?,
        )
        .await?;
        parse_articles(&resp.text().await?)
    }
}

impl BibliographicResolver for RemoteClient {
    fn is_available(&self) -> bool {
        self.ads.is_configured()
    }

    async fn lookup(&self, query: &BibQuery) -> Result<Vec<Article>, ExternalError> {
        if !self.is_available() {
            return Err(ExternalError::NotConfigured { service: SERVICE });
        }
        let articles = self
            .search_ads(query)
            .await
            .map_err(|e| e.into_external(SERVICE))?;
        tracing::debug!(query = %query_string(query), hits = articles.len(), "ADS search");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_config::AstroConfig;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "responseHeader": {"status": 0, "QTime": 7},
        "response": {
            "numFound": 1,
            "start": 0,
            "docs": [
                {
                    "bibcode": "2006AJ....131.1163S",
                    "title": ["The Two Micron All Sky Survey (2MASS)"],
                    "first_author": "Skrutskie, M. F.",
                    "year": "2006",
                    "doi": ["10.1086/498708"]
                }
            ]
        }
    }"#;

    #[test]
    fn parse_ads_response() {
        let articles = parse_articles(FIXTURE).unwrap();
        assert_eq!(
            articles,
            vec![Article {
                bibcode: "2006AJ....131.1163S".into(),
                title: Some("The Two Micron All Sky Survey (2MASS)".into()),
                first_author: "Skrutskie, M. F.".into(),
                year: "2006".into(),
                doi: Some("10.1086/498708".into()),
            }]
        );
        assert_eq!(articles[0].reference_key(), "Skru06");
    }

    #[test]
    fn missing_optional_fields_default() {
        let body = r#"{"response": {"docs": [{"bibcode": "2021arXiv210100001S"}]}}"#;
        let article = parse_articles(body).unwrap().remove(0);
        assert_eq!(article.title, None);
        assert_eq!(article.doi, None);
    }

    #[test]
    fn query_strings_quote_the_value() {
        assert_eq!(
            query_string(&BibQuery::Doi("10.1086/498708".into())),
            "doi:\"10.1086/498708\""
        );
        assert_eq!(
            query_string(&BibQuery::Arxiv("arXiv:2101.00001".into())),
            "identifier:\"arXiv:2101.00001\""
        );
    }

    #[tokio::test]
    async fn lookup_without_token_is_not_configured() {
        let client = RemoteClient::new(&AstroConfig::default()).unwrap();
        assert!(!client.is_available());
        assert_eq!(
            client
                .lookup(&BibQuery::Bibcode("2006AJ....131.1163S".into()))
                .await,
            Err(ExternalError::NotConfigured { service: "ADS" })
        );
    }

    #[tokio::test]
    #[ignore] // requires network and ADS_TOKEN
    async fn live_lookup() {
        let config = AstroConfig::load().unwrap();
        let client = RemoteClient::new(&config).unwrap();
        let articles = client
            .lookup(&BibQuery::Doi("10.1086/498708".into()))
            .await
            .unwrap();
        println!("{articles:?}");
    }
}
