use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::coords::SkyPosition;
use crate::validation::{self, ValidationError, limits};

/// A catalogued object, keyed by its canonical name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Source {
    pub source: String,
    pub ra_deg: Option<f64>,
    pub dec_deg: Option<f64>,
    /// Decimal year of the position.
    pub epoch_year: Option<f64>,
    pub equinox: Option<String>,
    pub shortname: Option<String>,
    /// Discovery reference. Blank until the store rejects it.
    pub reference: String,
    pub other_references: Option<String>,
    pub comments: Option<String>,
}

impl Source {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("source", &self.source, limits::SOURCE)?;
        if let Some(ra) = self.ra_deg {
            validation::right_ascension(ra)?;
        }
        if let Some(dec) = self.dec_deg {
            validation::declination(dec)?;
        }
        if let Some(epoch) = self.epoch_year {
            validation::finite("epoch_year", epoch)?;
        }
        validation::optional("equinox", self.equinox.as_deref(), limits::EQUINOX)?;
        validation::optional("shortname", self.shortname.as_deref(), limits::SHORTNAME)?;
        validation::optional("reference", Some(self.reference.as_str()), limits::REFERENCE)?;
        validation::optional(
            "other_references",
            self.other_references.as_deref(),
            limits::OTHER_REFERENCES,
        )?;
        validation::optional("comments", self.comments.as_deref(), limits::COMMENTS)?;
        Ok(())
    }

    /// Position, when both coordinates are set.
    #[must_use]
    pub fn position(&self) -> Option<SkyPosition> {
        match (self.ra_deg, self.dec_deg) {
            (Some(ra_deg), Some(dec_deg)) => Some(SkyPosition { ra_deg, dec_deg }),
            _ => None,
        }
    }
}

/// An alternate name of a source. The source's own name is stored as an
/// alias of itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Alias {
    pub source: String,
    pub other_name: String,
}

impl Alias {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("source", &self.source, limits::SOURCE)?;
        validation::required("other_name", &self.other_name, limits::OTHER_NAME)?;
        Ok(())
    }
}

/// One row of a source ingest batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SourceCandidate {
    pub source: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub ra_deg: Option<f64>,
    #[serde(default)]
    pub dec_deg: Option<f64>,
    #[serde(default)]
    pub epoch_year: Option<f64>,
    #[serde(default)]
    pub equinox: Option<String>,
    #[serde(default)]
    pub other_references: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl SourceCandidate {
    /// Candidate with a name and reference only.
    #[must_use]
    pub fn named(source: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn at(mut self, ra_deg: f64, dec_deg: f64) -> Self {
        self.ra_deg = Some(ra_deg);
        self.dec_deg = Some(dec_deg);
        self
    }

    /// Caller-supplied position, when both coordinates are given.
    #[must_use]
    pub fn position(&self) -> Option<SkyPosition> {
        match (self.ra_deg, self.dec_deg) {
            (Some(ra_deg), Some(dec_deg)) => Some(SkyPosition { ra_deg, dec_deg }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4046() -> Source {
        Source {
            source: "V4046 Sgr".into(),
            ra_deg: Some(273.54),
            dec_deg: Some(-32.79),
            epoch_year: Some(2000.0),
            equinox: Some("J2000".into()),
            shortname: None,
            reference: "Ref1".into(),
            other_references: None,
            comments: None,
        }
    }

    #[test]
    fn valid_source_passes() {
        assert!(v4046().validate().is_ok());
    }

    #[test]
    fn out_of_range_declination_fails() {
        let source = Source {
            dec_deg: Some(-132.79),
            ..v4046()
        };
        assert!(matches!(
            source.validate(),
            Err(ValidationError::OutOfRange { field: "dec_deg", .. })
        ));
    }

    #[test]
    fn over_long_reference_fails() {
        let source = Source {
            reference: "R".repeat(31),
            ..v4046()
        };
        assert!(matches!(
            source.validate(),
            Err(ValidationError::TooLong { field: "reference", .. })
        ));
    }

    #[test]
    fn candidate_position_needs_both_coordinates() {
        let mut candidate = SourceCandidate::named("TWA 27", "Ref1");
        assert_eq!(candidate.position(), None);
        candidate.ra_deg = Some(181.88);
        assert_eq!(candidate.position(), None);
        let candidate = candidate.at(181.88, -39.55);
        assert!(candidate.position().is_some());
    }

    #[test]
    fn candidate_deserializes_with_only_a_name() {
        let candidate: SourceCandidate = serde_json::from_str(r#"{"source": "TWA 27"}"#).unwrap();
        assert_eq!(candidate.source, "TWA 27");
        assert_eq!(candidate.reference, None);
    }
}
