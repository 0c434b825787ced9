use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError, limits};

fn check_common(source: &str, comments: Option<&str>, reference: &str) -> Result<(), ValidationError> {
    validation::required("source", source, limits::SOURCE)?;
    validation::optional("comments", comments, limits::COMMENTS)?;
    validation::required("reference", reference, limits::REFERENCE)?;
    Ok(())
}

/// Trigonometric parallax in milliarcseconds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Parallax {
    pub source: String,
    pub parallax_mas: f64,
    pub parallax_error: Option<f64>,
    pub adopted: bool,
    pub comments: Option<String>,
    pub reference: String,
}

impl Parallax {
    /// Negative errors are accepted here and flagged by the content checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_common(&self.source, self.comments.as_deref(), &self.reference)?;
        validation::finite("parallax_mas", self.parallax_mas)?;
        Ok(())
    }
}

/// Proper motion in milliarcseconds per year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProperMotion {
    pub source: String,
    pub pm_ra: f64,
    pub pm_ra_error: Option<f64>,
    pub pm_dec: f64,
    pub pm_dec_error: Option<f64>,
    pub adopted: bool,
    pub comments: Option<String>,
    pub reference: String,
}

impl ProperMotion {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_common(&self.source, self.comments.as_deref(), &self.reference)?;
        validation::finite("pm_ra", self.pm_ra)?;
        validation::finite("pm_dec", self.pm_dec)?;
        Ok(())
    }
}

/// Radial velocity in km/s.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RadialVelocity {
    pub source: String,
    pub rv_kms: f64,
    pub rv_kms_error: Option<f64>,
    pub adopted: bool,
    pub comments: Option<String>,
    pub reference: String,
}

impl RadialVelocity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_common(&self.source, self.comments.as_deref(), &self.reference)?;
        validation::finite("rv_kms", self.rv_kms)?;
        if let Some(error) = self.rv_kms_error {
            validation::non_negative("rv_kms_error", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rv(error: Option<f64>, comments: Option<String>) -> RadialVelocity {
        RadialVelocity {
            source: "V4046 Sgr".into(),
            rv_kms: -6.94,
            rv_kms_error: error,
            adopted: true,
            comments,
            reference: "Ref1".into(),
        }
    }

    #[test]
    fn radial_velocity_error_must_not_be_negative() {
        assert!(rv(Some(0.16), None).validate().is_ok());
        assert!(rv(None, None).validate().is_ok());
        assert!(matches!(
            rv(Some(-30.0), None).validate(),
            Err(ValidationError::Negative { field: "rv_kms_error", .. })
        ));
    }

    #[test]
    fn radial_velocity_comments_are_bounded() {
        assert!(rv(None, Some("c".repeat(1001))).validate().is_err());
    }

    #[test]
    fn parallax_requires_reference() {
        let plx = Parallax {
            source: "V4046 Sgr".into(),
            parallax_mas: 13.8,
            parallax_error: Some(-30.0),
            adopted: true,
            comments: None,
            reference: String::new(),
        };
        assert_eq!(
            plx.validate(),
            Err(ValidationError::Missing { field: "reference" })
        );
    }
}
