use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// A photometric passband keyed by `instrument.filter`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PhotometryFilter {
    pub band: String,
    pub ucd: Option<String>,
    pub effective_wavelength_angstroms: f64,
    pub width_angstroms: Option<f64>,
}

impl PhotometryFilter {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::band(&self.band)?;
        if let Some(ucd) = &self.ucd {
            validation::ucd(ucd)?;
        }
        validation::non_negative(
            "effective_wavelength_angstroms",
            self.effective_wavelength_angstroms,
        )?;
        if let Some(width) = self.width_angstroms {
            validation::non_negative("width_angstroms", width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn j_band() -> PhotometryFilter {
        PhotometryFilter {
            band: "2MASS.J".into(),
            ucd: Some("em.IR.J".into()),
            effective_wavelength_angstroms: 12_350.0,
            width_angstroms: Some(1_624.3),
        }
    }

    #[test]
    fn registered_filter_passes() {
        assert!(j_band().validate().is_ok());
    }

    #[test]
    fn band_without_separator_fails() {
        let filter = PhotometryFilter {
            band: "not_a_filter".into(),
            ..j_band()
        };
        assert_eq!(
            filter.validate(),
            Err(ValidationError::MalformedBand("not_a_filter".into()))
        );
    }

    #[test]
    fn negative_wavelength_fails() {
        let filter = PhotometryFilter {
            effective_wavelength_angstroms: -1.0,
            ..j_band()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn made_up_ucd_fails() {
        let filter = PhotometryFilter {
            ucd: Some("fake.IR.H".into()),
            ..j_band()
        };
        assert_eq!(
            filter.validate(),
            Err(ValidationError::UnknownUcd("fake.IR.H".into()))
        );
    }
}
