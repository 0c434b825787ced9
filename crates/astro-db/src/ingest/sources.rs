//! Source ingest: resolve a candidate against the catalogue, then add it as
//! an alias of the source it denotes or as a new source.
//!
//! The decision itself is made by [`ResolutionState`]; this module runs the
//! store query or resolver call each state asks for.

use astro_config::IngestConfig;
use astro_core::coords::SkyPosition;
use astro_core::entities::{Alias, Source, SourceCandidate};
use astro_core::enums::{MatchClass, MatchStage};
use astro_core::names::canonical;
use astro_core::observer::IngestObserver;
use astro_core::reports::{SourceBatchReport, SourceOutcome};
use astro_core::resolution::{Resolution, ResolutionState};
use astro_core::services::{NameResolver, ResolvedObject};
use astro_core::validation::{self, limits};

use super::{FailurePolicy, counter, invariant};
use crate::error::IngestError;
use crate::service::AstroService;

/// Epoch and equinox given to coordinates taken from the name resolver.
const RESOLVER_EPOCH: f64 = 2000.0;
const RESOLVER_EQUINOX: &str = "J2000";

/// Result of [`AstroService::find_source`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLookup {
    pub resolution: Resolution,
    /// What the name resolver said, if it was consulted and knew the name.
    pub resolved: Option<ResolvedObject>,
    pub resolver_consulted: bool,
}

impl SourceLookup {
    const fn unsearched() -> Self {
        Self {
            resolution: Resolution::unsearched(),
            resolved: None,
            resolver_consulted: false,
        }
    }
}

async fn resolve_name<R: NameResolver>(
    resolver: &R,
    name: &str,
) -> Result<Option<ResolvedObject>, IngestError> {
    resolver
        .resolve(name)
        .await
        .map_err(|source| IngestError::External {
            name: name.to_string(),
            source,
        })
}

fn candidate_position(candidate: &SourceCandidate) -> Result<Option<SkyPosition>, IngestError> {
    SkyPosition::from_parts(candidate.ra_deg, candidate.dec_deg).map_err(IngestError::from)
}

impl AstroService {
    /// Run the resolution chain for `name` without writing anything.
    ///
    /// Stages run in order and the first stage with a match decides:
    /// exact name or alias, fuzzy name, the resolver's identifiers, then a
    /// cone of `radius_arcsec` around `position` (or the resolver's position).
    pub async fn find_source<R: NameResolver>(
        &self,
        name: &str,
        position: Option<SkyPosition>,
        resolver: &R,
        radius_arcsec: f64,
    ) -> Result<SourceLookup, IngestError> {
        let name = canonical(name);
        let mut consulted: Option<Option<ResolvedObject>> = None;
        let mut state = ResolutionState::start();

        loop {
            let found = match &state {
                ResolutionState::Finished(resolution) => {
                    tracing::debug!(
                        name,
                        class = %resolution.class,
                        stage = ?resolution.stage,
                        matches = ?resolution.matches,
                        "resolution finished"
                    );
                    return Ok(SourceLookup {
                        resolution: resolution.clone(),
                        resolver_consulted: consulted.is_some(),
                        resolved: consulted.flatten(),
                    });
                }
                ResolutionState::Searching(MatchStage::Exact) => self.exact_matches(name).await?,
                ResolutionState::Searching(MatchStage::Fuzzy) => self.fuzzy_matches(name).await?,
                ResolutionState::Searching(MatchStage::Resolver)
                | ResolutionState::Disambiguating { .. } => {
                    if consulted.is_none() {
                        consulted = Some(resolve_name(resolver, name).await?);
                    }
                    match consulted.as_ref().and_then(Option::as_ref) {
                        Some(object) => self.exact_matches_any(&object.all_names()).await?,
                        None => Vec::new(),
                    }
                }
                ResolutionState::Searching(MatchStage::Coordinates) => {
                    let from_resolver = consulted
                        .as_ref()
                        .and_then(Option::as_ref)
                        .map(ResolvedObject::position);
                    match position.or(from_resolver) {
                        Some(centre) => self.cone_search(centre, radius_arcsec).await?,
                        None => Vec::new(),
                    }
                }
            };
            state = state.advance(found);
        }
    }

    /// The one stored source `name` denotes by exact name or alias.
    ///
    /// Measurements attach only to sources that already exist, so no fuzzy,
    /// resolver or coordinate fallback is attempted.
    pub async fn locate_source(&self, name: &str) -> Result<String, IngestError> {
        let name = canonical(name);
        let mut matches = self.exact_matches(name).await?;
        match matches.len() {
            0 => Err(IngestError::UnknownSource(name.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(IngestError::Ambiguous {
                name: name.to_string(),
                matches,
            }),
        }
    }

    /// Ingest one candidate.
    ///
    /// Returns the outcome for matched and new sources. Ambiguity, failed
    /// validation, store constraint failures and resolver failures come back
    /// as errors with nothing written.
    pub async fn ingest_source<R: NameResolver>(
        &self,
        candidate: &SourceCandidate,
        resolver: &R,
        config: &IngestConfig,
    ) -> Result<SourceOutcome, IngestError> {
        let name = canonical(&candidate.source);
        validation::required("source", name, limits::SOURCE)?;
        let position = candidate_position(candidate)?;

        let lookup = if config.search_db {
            self.find_source(name, position, resolver, config.search_radius_arcsec)
                .await?
        } else {
            SourceLookup::unsearched()
        };

        match lookup.resolution.class {
            MatchClass::Unique | MatchClass::ResolvedExternally => {
                self.record_match(name, &lookup.resolution).await
            }
            MatchClass::Multiple => Err(IngestError::Ambiguous {
                name: name.to_string(),
                matches: lookup.resolution.matches,
            }),
            MatchClass::NoMatch => {
                let resolved = if position.is_none() && !lookup.resolver_consulted {
                    resolve_name(resolver, name).await?
                } else {
                    lookup.resolved
                };
                self.add_new_source(name, candidate, position, resolved.as_ref())
                    .await
            }
        }
    }

    async fn record_match(
        &self,
        name: &str,
        resolution: &Resolution,
    ) -> Result<SourceOutcome, IngestError> {
        let (Some(source), Some(stage)) = (resolution.matched_source(), resolution.stage) else {
            return Err(IngestError::Invariant(format!(
                "{name} classified as {} without a matched source",
                resolution.class
            )));
        };

        if self.alias_exists(source, name).await? {
            tracing::debug!(name, source, "already present");
            return Ok(SourceOutcome::AlreadyPresent {
                source: source.to_string(),
            });
        }

        self.add_alias(&Alias {
            source: source.to_string(),
            other_name: name.to_string(),
        })
        .await?;
        tracing::debug!(name, source, %stage, "alias added to existing source");
        Ok(SourceOutcome::AliasAdded {
            source: source.to_string(),
            alias: name.to_string(),
            stage,
        })
    }

    async fn add_new_source(
        &self,
        name: &str,
        candidate: &SourceCandidate,
        position: Option<SkyPosition>,
        resolved: Option<&ResolvedObject>,
    ) -> Result<SourceOutcome, IngestError> {
        let (position, epoch_year, equinox) = match (position, resolved) {
            (Some(position), _) => (position, candidate.epoch_year, candidate.equinox.clone()),
            (None, Some(object)) => (
                object.position(),
                Some(RESOLVER_EPOCH),
                Some(RESOLVER_EQUINOX.to_string()),
            ),
            (None, None) => {
                return Err(IngestError::MissingCoordinates {
                    name: name.to_string(),
                });
            }
        };

        let source = Source {
            source: name.to_string(),
            ra_deg: Some(position.ra_deg),
            dec_deg: Some(position.dec_deg),
            epoch_year,
            equinox,
            shortname: None,
            reference: candidate
                .reference
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            other_references: candidate.other_references.clone(),
            comments: candidate.comments.clone(),
        };
        self.insert_source(&source).await?;
        Ok(SourceOutcome::Added {
            source: name.to_string(),
        })
    }

    /// Ingest a batch of candidates in order.
    ///
    /// Item failures abort the batch or are counted, per `config`. The
    /// returned counters have been checked against the batch invariants.
    pub async fn ingest_sources<R, O>(
        &self,
        candidates: &[SourceCandidate],
        resolver: &R,
        config: &IngestConfig,
        observer: &O,
    ) -> Result<SourceBatchReport, IngestError>
    where
        R: NameResolver,
        O: IngestObserver,
    {
        let policy = FailurePolicy::from_config(config);
        let mut report = SourceBatchReport::new(counter(candidates.len())?);
        tracing::info!(count = candidates.len(), "ingesting sources");
        observer.started(candidates.len());

        for (index, candidate) in candidates.iter().enumerate() {
            let outcome = match self.ingest_source(candidate, resolver, config).await {
                Ok(outcome) => outcome,
                Err(err) if policy.aborts(&err) => {
                    observer.finished();
                    tracing::error!(source = %candidate.source, error = %err, "aborting source batch");
                    return Err(err);
                }
                Err(IngestError::Ambiguous { name, matches }) => {
                    tracing::warn!(source = %name, ?matches, "multiple matches, skipping");
                    SourceOutcome::Ambiguous { matches }
                }
                Err(err) => {
                    tracing::warn!(source = %candidate.source, error = %err, "skipping source");
                    SourceOutcome::Skipped {
                        reason: err.to_string(),
                    }
                }
            };
            report.record(&outcome);
            observer.item(index, &candidate.source, outcome.status());
        }

        observer.finished();
        report.verify().map_err(invariant)?;
        tracing::info!(
            added = report.added,
            existing = report.existing,
            ambiguous = report.ambiguous,
            skipped = report.skipped,
            aliases = report.aliases_added(),
            "source batch finished"
        );
        Ok(report)
    }
}
