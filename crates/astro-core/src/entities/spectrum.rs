use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Regime;
use crate::validation::{self, ValidationError, limits};

/// A spectrum of a source, stored as a pointer to the data file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Spectrum {
    pub source: String,
    pub access_url: String,
    pub original_spectrum: Option<String>,
    pub local_spectrum: Option<String>,
    pub regime: Regime,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
    pub mode: Option<String>,
    pub observation_date: NaiveDateTime,
    pub comments: Option<String>,
    pub reference: String,
}

impl Spectrum {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("source", &self.source, limits::SOURCE)?;
        validation::required("access_url", &self.access_url, limits::URL)?;
        validation::optional(
            "original_spectrum",
            self.original_spectrum.as_deref(),
            limits::URL,
        )?;
        validation::optional("local_spectrum", self.local_spectrum.as_deref(), limits::URL)?;
        validation::optional("telescope", self.telescope.as_deref(), limits::TELESCOPE)?;
        validation::optional("instrument", self.instrument.as_deref(), limits::INSTRUMENT)?;
        validation::optional("mode", self.mode.as_deref(), limits::MODE)?;
        validation::optional("comments", self.comments.as_deref(), limits::COMMENTS)?;
        validation::required("reference", &self.reference, limits::REFERENCE)?;
        Ok(())
    }
}

/// Parse an observation date given as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`,
/// or ISO 8601 with a `T` separator and optional fractional seconds.
pub fn parse_observation_date(value: &str) -> Result<NaiveDateTime, ValidationError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ValidationError::NotADate {
            field: "observation_date",
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dates_parse_with_or_without_time() {
        let midnight = parse_observation_date("2013-03-02").unwrap();
        assert_eq!(midnight.to_string(), "2013-03-02 00:00:00");
        let timed = parse_observation_date("2013-03-02T05:17:31.5").unwrap();
        assert_eq!(timed.format("%H:%M:%S").to_string(), "05:17:31");
        assert!(parse_observation_date("2013-03-02 05:17").is_ok());
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert_eq!(
            parse_observation_date("last tuesday"),
            Err(ValidationError::NotADate {
                field: "observation_date",
                value: "last tuesday".into()
            })
        );
    }
}
