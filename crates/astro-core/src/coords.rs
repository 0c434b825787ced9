//! Sky positions and angular separation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// An ICRS position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkyPosition {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl SkyPosition {
    /// Build a position, rejecting out-of-range coordinates.
    pub fn new(ra_deg: f64, dec_deg: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            ra_deg: validation::right_ascension(ra_deg)?,
            dec_deg: validation::declination(dec_deg)?,
        })
    }

    /// Build a position from optional coordinates.
    ///
    /// Each coordinate that is present is range-checked. Both absent is
    /// `None`; one without the other is an error naming the missing one.
    pub fn from_parts(
        ra_deg: Option<f64>,
        dec_deg: Option<f64>,
    ) -> Result<Option<Self>, ValidationError> {
        let ra_deg = ra_deg.map(validation::right_ascension).transpose()?;
        let dec_deg = dec_deg.map(validation::declination).transpose()?;
        match (ra_deg, dec_deg) {
            (Some(ra_deg), Some(dec_deg)) => Ok(Some(Self { ra_deg, dec_deg })),
            (Some(_), None) => Err(ValidationError::Missing { field: "dec_deg" }),
            (None, Some(_)) => Err(ValidationError::Missing { field: "ra_deg" }),
            (None, None) => Ok(None),
        }
    }

    /// Great-circle distance to `other` in arcseconds (haversine form).
    #[must_use]
    pub fn separation_arcsec(&self, other: &Self) -> f64 {
        let (ra1, dec1) = (self.ra_deg.to_radians(), self.dec_deg.to_radians());
        let (ra2, dec2) = (other.ra_deg.to_radians(), other.dec_deg.to_radians());
        let half_ddec = ((dec2 - dec1) / 2.0).sin();
        let half_dra = ((ra2 - ra1) / 2.0).sin();
        let a = dec1.cos().mul_add(dec2.cos() * half_dra * half_dra, half_ddec * half_ddec);
        let angle = 2.0 * a.sqrt().min(1.0).asin();
        angle.to_degrees() * ARCSEC_PER_DEGREE
    }

    /// Declination band `[dec - r, dec + r]` that encloses a cone of radius `r`.
    #[must_use]
    pub fn dec_window(&self, radius_arcsec: f64) -> (f64, f64) {
        let radius_deg = radius_arcsec / ARCSEC_PER_DEGREE;
        (
            (self.dec_deg - radius_deg).max(-90.0),
            (self.dec_deg + radius_deg).min(90.0),
        )
    }
}
