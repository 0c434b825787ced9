//! Pre-insert field contracts.
//!
//! Every persisted attribute carries a length, range, or vocabulary contract.
//! The store enforces most of them again through `CHECK` constraints, but
//! records are validated here first so that bad input comes back as a typed
//! [`ValidationError`] rather than a rejected statement.
//!
//! Each function checks one attribute and returns the accepted value.

use thiserror::Error;

use crate::ucd;

/// Maximum lengths of the bounded string columns.
pub mod limits {
    pub const SOURCE: usize = 100;
    pub const OTHER_NAME: usize = 100;
    pub const REFERENCE: usize = 30;
    pub const OTHER_REFERENCES: usize = 100;
    pub const BIBCODE: usize = 100;
    pub const DOI: usize = 100;
    pub const DESCRIPTION: usize = 1000;
    pub const COMMENTS: usize = 1000;
    pub const EQUINOX: usize = 10;
    pub const SHORTNAME: usize = 30;
    pub const TELESCOPE: usize = 30;
    pub const INSTRUMENT: usize = 30;
    pub const MODE: usize = 30;
    pub const BAND: usize = 30;
    pub const UCD: usize = 100;
    pub const REGIME: usize = 30;
    pub const VERSION: usize = 30;
    pub const PARAMETER: usize = 30;
    pub const MODEL: usize = 100;
    pub const UNIT: usize = 30;
    pub const URL: usize = 1000;
}

/// A field value that failed its contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is {actual} characters long, the limit is {max}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("band {0:?} must have the form instrument.filter")]
    MalformedBand(String),

    #[error("{0:?} is not in the UCD vocabulary")]
    UnknownUcd(String),

    #[error("{value} is reported with more decimal places than its uncertainty {error}")]
    ExcessPrecision { value: f64, error: f64 },

    #[error("{field} = {value:?} is not a date")]
    NotADate { field: &'static str, value: String },

    #[error("{field} = {value:?} is not one of: {allowed}")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: String,
    },
}

/// A non-blank string of at most `max` characters.
pub fn required<'a>(field: &'static str, value: &'a str, max: usize) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing { field });
    }
    bounded(field, value, max)
}

/// An optional string of at most `max` characters.
pub fn optional<'a>(
    field: &'static str,
    value: Option<&'a str>,
    max: usize,
) -> Result<Option<&'a str>, ValidationError> {
    value.map(|v| bounded(field, v, max)).transpose()
}

fn bounded<'a>(field: &'static str, value: &'a str, max: usize) -> Result<&'a str, ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(value)
}

/// A finite value in `[min, max]`.
pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// A finite value that is zero or positive.
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

pub fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

/// Right ascension in degrees, `[0, 360]`.
pub fn right_ascension(ra_deg: f64) -> Result<f64, ValidationError> {
    in_range("ra_deg", ra_deg, 0.0, 360.0)
}

/// Declination in degrees, `[-90, 90]`.
pub fn declination(dec_deg: f64) -> Result<f64, ValidationError> {
    in_range("dec_deg", dec_deg, -90.0, 90.0)
}

/// A photometric band identifier of the form `instrument.filter`.
pub fn band(value: &str) -> Result<&str, ValidationError> {
    required("band", value, limits::BAND)?;
    match value.split_once('.') {
        Some((instrument, filter)) if !instrument.is_empty() && !filter.is_empty() => Ok(value),
        _ => Err(ValidationError::MalformedBand(value.to_string())),
    }
}

/// A UCD from the controlled vocabulary.
pub fn ucd(value: &str) -> Result<&str, ValidationError> {
    bounded("ucd", value, limits::UCD)?;
    if ucd::is_known(value) {
        Ok(value)
    } else {
        Err(ValidationError::UnknownUcd(value.to_string()))
    }
}

/// One of a fixed set of labels.
pub fn one_of<'a>(field: &'static str, value: &'a str, allowed: &[&str]) -> Result<&'a str, ValidationError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::NotAllowed {
            field,
            value: value.to_string(),
            allowed: allowed.join(", "),
        })
    }
}

/// A measured value must not carry more decimal places than its uncertainty.
///
/// `30.1 ± 0.5` passes, `30.123 ± 0.5` does not. A missing or zero
/// uncertainty imposes no limit.
pub fn precision(value: f64, error: Option<f64>) -> Result<f64, ValidationError> {
    finite("value", value)?;
    let Some(error) = error else {
        return Ok(value);
    };
    finite("error", error)?;
    if error == 0.0 {
        return Ok(value);
    }
    if decimal_places(value) > decimal_places(error) {
        return Err(ValidationError::ExcessPrecision { value, error });
    }
    Ok(value)
}

/// Decimal places in the shortest representation that round-trips `value`.
fn decimal_places(value: f64) -> usize {
    let text = value.abs().to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.trim_end_matches('0').len())
}
