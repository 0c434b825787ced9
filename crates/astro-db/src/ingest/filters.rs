//! Photometry filter registration.
//!
//! A band is keyed `instrument.filter`. Its effective wavelength and width
//! come from the filter profile service; its UCD is either given or derived
//! from the wavelength.

use astro_core::entities::PhotometryFilter;
use astro_core::reports::FilterOutcome;
use astro_core::services::FilterProfileSource;
use astro_core::ucd;
use astro_core::validation::{self, limits};
use serde::{Deserialize, Serialize};

use super::instruments::InstrumentRequest;
use crate::error::IngestError;
use crate::service::AstroService;

/// Mode under which photometric instruments are registered.
pub const IMAGING_MODE: &str = "Imaging";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    pub telescope: String,
    pub instrument: String,
    pub filter: String,
    /// Overrides the UCD derived from the effective wavelength.
    pub ucd: Option<String>,
}

impl FilterRequest {
    #[must_use]
    pub fn band(&self) -> String {
        format!("{}.{}", self.instrument.trim(), self.filter.trim())
    }
}

impl AstroService {
    /// Register a photometry filter. Registering a band twice reports it as
    /// already present without contacting the profile service.
    pub async fn ingest_filter<S: FilterProfileSource>(
        &self,
        request: &FilterRequest,
        svo: &S,
    ) -> Result<FilterOutcome, IngestError> {
        let telescope = validation::required("telescope", request.telescope.trim(), limits::TELESCOPE)?;
        let instrument = validation::required("instrument", request.instrument.trim(), limits::INSTRUMENT)?;
        let filter = validation::required("filter", request.filter.trim(), limits::BAND)?;
        let band = request.band();
        validation::band(&band)?;
        if let Some(ucd) = &request.ucd {
            validation::ucd(ucd)?;
        }

        self.ingest_instrument(&InstrumentRequest {
            telescope: telescope.to_string(),
            instrument: Some(instrument.to_string()),
            mode: Some(IMAGING_MODE.to_string()),
            ..InstrumentRequest::default()
        })
        .await?;

        if self.get_filter(&band).await?.is_some() {
            tracing::info!(band, "filter already present");
            return Ok(FilterOutcome::AlreadyPresent { band });
        }

        let profile = svo
            .fetch(telescope, instrument, filter)
            .await
            .map_err(|source| IngestError::External {
                name: band.clone(),
                source,
            })?;
        let wavelength = profile.effective_wavelength_angstroms;
        let ucd = request
            .ucd
            .clone()
            .or_else(|| ucd::assign(wavelength).map(ToString::to_string));
        if ucd.is_none() {
            tracing::warn!(band, wavelength, "no UCD band covers this wavelength");
        }

        let row = PhotometryFilter {
            band: band.clone(),
            ucd: ucd.clone(),
            effective_wavelength_angstroms: wavelength,
            width_angstroms: Some(profile.width_effective_angstroms),
        };
        self.insert_filter(&row).await?;
        tracing::info!(band, ?ucd, wavelength, "filter added");
        Ok(FilterOutcome::Added {
            band,
            ucd,
            effective_wavelength_angstroms: wavelength,
            width_angstroms: profile.width_effective_angstroms,
        })
    }
}
