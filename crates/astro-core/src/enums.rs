//! Controlled vocabularies and classification enums.
//!
//! Storage labels come from `as_str()`. Regimes use their UCD strings, the
//! rest serialize as `snake_case`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

// ---------------------------------------------------------------------------
// Regime
// ---------------------------------------------------------------------------

/// Wavelength regime of a spectrum or photometric point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Regime {
    #[serde(rename = "em.UV")]
    Ultraviolet,
    #[serde(rename = "em.opt")]
    OpticalUcd,
    #[serde(rename = "optical")]
    Optical,
    #[serde(rename = "em.IR.NIR")]
    NirUcd,
    #[serde(rename = "nir")]
    Nir,
    #[serde(rename = "em.IR")]
    Infrared,
    #[serde(rename = "em.IR.MIR")]
    MirUcd,
    #[serde(rename = "mir")]
    Mir,
    #[serde(rename = "em.mm")]
    Millimeter,
    #[serde(rename = "em.radio")]
    Radio,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Regime {
    pub const ALL: [Self; 11] = [
        Self::Ultraviolet,
        Self::OpticalUcd,
        Self::Optical,
        Self::NirUcd,
        Self::Nir,
        Self::Infrared,
        Self::MirUcd,
        Self::Mir,
        Self::Millimeter,
        Self::Radio,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ultraviolet => "em.UV",
            Self::OpticalUcd => "em.opt",
            Self::Optical => "optical",
            Self::NirUcd => "em.IR.NIR",
            Self::Nir => "nir",
            Self::Infrared => "em.IR",
            Self::MirUcd => "em.IR.MIR",
            Self::Mir => "mir",
            Self::Millimeter => "em.mm",
            Self::Radio => "em.radio",
            Self::Unknown => "unknown",
        }
    }

    /// Seed description stored in the `regimes` table.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ultraviolet => "Ultraviolet",
            Self::OpticalUcd | Self::Optical => "Optical",
            Self::NirUcd | Self::Nir => "Near-infrared, 1-5 microns",
            Self::Infrared => "Infrared",
            Self::MirUcd | Self::Mir => "Mid-infrared, 5-30 microns",
            Self::Millimeter => "Millimeter",
            Self::Radio => "Radio",
            Self::Unknown => "Unknown regime",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|regime| regime.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "regime",
                value: s.to_string(),
                allowed: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// How a companion relates to the primary source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Relationship {
    Child,
    Sibling,
    Parent,
    #[serde(rename = "Unresolved Parent")]
    UnresolvedParent,
}

impl Relationship {
    pub const ALL: [Self; 4] = [Self::Child, Self::Sibling, Self::Parent, Self::UnresolvedParent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Sibling => "Sibling",
            Self::Parent => "Parent",
            Self::UnresolvedParent => "Unresolved Parent",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "relationship",
                value: s.to_string(),
                allowed: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

// ---------------------------------------------------------------------------
// MatchStage
// ---------------------------------------------------------------------------

/// Stage of the resolution fallback chain, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    Exact,
    Fuzzy,
    Resolver,
    Coordinates,
}

impl MatchStage {
    /// The stage tried when this one finds nothing.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Exact => Some(Self::Fuzzy),
            Self::Fuzzy => Some(Self::Resolver),
            Self::Resolver => Some(Self::Coordinates),
            Self::Coordinates => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Resolver => "resolver",
            Self::Coordinates => "coordinates",
        }
    }
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MatchClass
// ---------------------------------------------------------------------------

/// Terminal classification of a candidate name against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// Exactly one existing source matched.
    Unique,
    /// More than one existing source matched.
    Multiple,
    /// Nothing matched; the candidate is a new source.
    NoMatch,
    /// Fuzzy matching was ambiguous, but the resolver's identifiers single out
    /// one of the candidates.
    ResolvedExternally,
}

impl MatchClass {
    /// Whether the candidate denotes exactly one existing source.
    #[must_use]
    pub const fn is_existing(self) -> bool {
        matches!(self, Self::Unique | Self::ResolvedExternally)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Multiple => "multiple",
            Self::NoMatch => "no_match",
            Self::ResolvedExternally => "resolved_externally",
        }
    }
}

impl fmt::Display for MatchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SpectrumKey
// ---------------------------------------------------------------------------

/// Column compared when deciding whether a spectrum is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumKey {
    Reference,
    ObservationDate,
    Telescope,
    Instrument,
    Mode,
    Regime,
    AccessUrl,
}

impl SpectrumKey {
    /// Key set used when none is configured.
    pub const DEFAULT_SET: [Self; 4] = [
        Self::Reference,
        Self::ObservationDate,
        Self::Instrument,
        Self::Mode,
    ];

    /// Column name in the `spectra` table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::ObservationDate => "observation_date",
            Self::Telescope => "telescope",
            Self::Instrument => "instrument",
            Self::Mode => "mode",
            Self::Regime => "regime",
            Self::AccessUrl => "access_url",
        }
    }
}

impl fmt::Display for SpectrumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Coarse per-item result reported to an [`crate::observer::IngestObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Added,
    Existing,
    Duplicate,
    Ambiguous,
    Skipped,
}

impl ItemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Existing => "existing",
            Self::Duplicate => "duplicate",
            Self::Ambiguous => "ambiguous",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
