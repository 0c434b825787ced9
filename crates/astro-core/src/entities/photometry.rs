use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Regime;
use crate::validation::{self, ValidationError, limits};

/// A magnitude of a source in one band from one reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Photometry {
    pub source: String,
    pub band: String,
    pub magnitude: f64,
    #[serde(default)]
    pub magnitude_error: Option<f64>,
    #[serde(default)]
    pub telescope: Option<String>,
    /// Decimal year of the observation.
    #[serde(default)]
    pub epoch: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
    pub reference: String,
    #[serde(default)]
    pub regime: Option<Regime>,
}

impl Photometry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("source", &self.source, limits::SOURCE)?;
        validation::band(&self.band)?;
        validation::precision(self.magnitude, self.magnitude_error)?;
        validation::optional("telescope", self.telescope.as_deref(), limits::TELESCOPE)?;
        validation::optional("comments", self.comments.as_deref(), limits::COMMENTS)?;
        validation::required("reference", &self.reference, limits::REFERENCE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(magnitude: f64, error: Option<f64>) -> Photometry {
        Photometry {
            source: "TWA 27".into(),
            band: "2MASS.J".into(),
            magnitude,
            magnitude_error: error,
            telescope: Some("2MASS".into()),
            epoch: None,
            comments: None,
            reference: "Cutr03".into(),
            regime: Some(Regime::Nir),
        }
    }

    #[test]
    fn magnitude_precision_follows_its_error() {
        assert!(point(13.0, Some(0.03)).validate().is_ok());
        assert!(point(30.1, Some(0.5)).validate().is_ok());
        assert_eq!(
            point(30.123, Some(0.5)).validate(),
            Err(ValidationError::ExcessPrecision {
                value: 30.123,
                error: 0.5
            })
        );
    }

    #[test]
    fn regime_reads_from_ucd_label() {
        let json = r#"{"source": "TWA 27", "band": "2MASS.J", "magnitude": 13.0,
                       "reference": "Cutr03", "regime": "em.IR.NIR"}"#;
        let point: Photometry = serde_json::from_str(json).unwrap();
        assert_eq!(point.regime, Some(Regime::NirUcd));
    }
}
