//! Source resolution as an explicit state machine.
//!
//! A candidate name is matched against the store through an ordered fallback
//! chain of [`MatchStage`]s. The first stage that finds anything decides the
//! classification; later stages are never consulted.
//!
//! ```text
//! Searching(exact) ─0→ Searching(fuzzy) ─0→ Searching(resolver) ─0→ Searching(coordinates) ─0→ NoMatch
//!        │1 / n            │1          │n              │1 / n                  │1 / n
//!        ▼                 ▼           ▼               ▼                       ▼
//!   Unique/Multiple     Unique   Disambiguating ─1→ ResolvedExternally
//!                                              └─else→ Multiple
//! ```
//!
//! The machine does no I/O. The driver in `astro-db` runs the query each
//! state asks for and feeds the matching source names back through
//! [`ResolutionState::advance`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{MatchClass, MatchStage};

/// Final result of resolving one candidate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Resolution {
    pub class: MatchClass,
    /// Stage that decided the class. `None` for [`MatchClass::NoMatch`].
    pub stage: Option<MatchStage>,
    /// Canonical names of the matched sources, sorted.
    pub matches: Vec<String>,
}

impl Resolution {
    /// A candidate that was not looked up at all.
    #[must_use]
    pub const fn unsearched() -> Self {
        Self {
            class: MatchClass::NoMatch,
            stage: None,
            matches: Vec::new(),
        }
    }

    /// The single source the candidate denotes, if any.
    #[must_use]
    pub fn matched_source(&self) -> Option<&str> {
        if self.class.is_existing() {
            self.matches.first().map(String::as_str)
        } else {
            None
        }
    }
}

/// Where the resolution currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    /// Waiting for the matches of this stage.
    Searching(MatchStage),
    /// Fuzzy matching returned several sources. Waiting for the store hits of
    /// the resolver's identifiers to pick one.
    Disambiguating { candidates: Vec<String> },
    Finished(Resolution),
}

impl ResolutionState {
    #[must_use]
    pub const fn start() -> Self {
        Self::Searching(MatchStage::Exact)
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// Feed the source names found for the current state.
    ///
    /// Stages that cannot run (no resolver answer, no coordinates) are
    /// advanced with an empty list.
    #[must_use]
    pub fn advance(self, found: Vec<String>) -> Self {
        let found = dedup(found);
        match self {
            Self::Searching(stage) => match found.len() {
                0 => stage.next().map_or_else(
                    || Self::Finished(Resolution::unsearched()),
                    Self::Searching,
                ),
                1 => finish(MatchClass::Unique, stage, found),
                _ if stage == MatchStage::Fuzzy => Self::Disambiguating { candidates: found },
                _ => finish(MatchClass::Multiple, stage, found),
            },
            Self::Disambiguating { candidates } => {
                let picked: Vec<String> = found
                    .into_iter()
                    .filter(|name| candidates.contains(name))
                    .collect();
                if picked.len() == 1 {
                    finish(MatchClass::ResolvedExternally, MatchStage::Resolver, picked)
                } else {
                    finish(MatchClass::Multiple, MatchStage::Fuzzy, candidates)
                }
            }
            finished @ Self::Finished(_) => finished,
        }
    }

    /// Resolution, once finished.
    #[must_use]
    pub fn into_resolution(self) -> Option<Resolution> {
        match self {
            Self::Finished(resolution) => Some(resolution),
            _ => None,
        }
    }
}

fn finish(class: MatchClass, stage: MatchStage, matches: Vec<String>) -> ResolutionState {
    ResolutionState::Finished(Resolution {
        class,
        stage: Some(stage),
        matches,
    })
}

fn dedup(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names.dedup();
    names
}

/// Run the machine against precomputed stage results. `lookups` is consulted
/// lazily, once per state, in order.
pub fn resolve_with<F>(mut lookups: F) -> Resolution
where
    F: FnMut(&ResolutionState) -> Vec<String>,
{
    let mut state = ResolutionState::start();
    loop {
        if let ResolutionState::Finished(resolution) = state {
            return resolution;
        }
        let found = lookups(&state);
        state = state.advance(found);
    }
}
