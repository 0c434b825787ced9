//! Telescope and instrument ingest.

use astro_core::entities::{Instrument, Telescope};
use astro_core::reports::InstrumentReport;
use astro_core::validation::{self, ValidationError, limits};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::helpers::non_blank;
use crate::service::AstroService;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentRequest {
    pub telescope: String,
    /// Instrument and mode go together: give both or neither.
    pub instrument: Option<String>,
    pub mode: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}

impl AstroService {
    /// Make sure the telescope exists, and the instrument in that mode if one
    /// is named. Rows that already exist are left alone.
    pub async fn ingest_instrument(
        &self,
        request: &InstrumentRequest,
    ) -> Result<InstrumentReport, IngestError> {
        let telescope = validation::required("telescope", request.telescope.trim(), limits::TELESCOPE)?;
        let instrument = request.instrument.as_deref().and_then(non_blank);
        let mode = request.mode.as_deref().and_then(non_blank);
        let pair = match (instrument, mode) {
            (Some(instrument), Some(mode)) => Some((instrument, mode)),
            (None, None) => None,
            (Some(_), None) => return Err(ValidationError::Missing { field: "mode" }.into()),
            (None, Some(_)) => return Err(ValidationError::Missing { field: "instrument" }.into()),
        };

        let mut report = InstrumentReport::default();
        if !self.telescope_exists(telescope).await? {
            self.insert_telescope(&Telescope {
                telescope: telescope.to_string(),
                description: if pair.is_none() {
                    request.description.clone()
                } else {
                    None
                },
                reference: request.reference.clone(),
            })
            .await?;
            report.telescope_added = true;
        }

        if let Some((instrument, mode)) = pair {
            if self.instrument_exists(instrument, mode, telescope).await? {
                tracing::debug!(instrument, mode, telescope, "instrument already present");
            } else {
                self.insert_instrument(&Instrument {
                    instrument: instrument.to_string(),
                    mode: mode.to_string(),
                    telescope: telescope.to_string(),
                    description: request.description.clone(),
                    reference: request.reference.clone(),
                })
                .await?;
                report.instrument_added = true;
            }
        }

        tracing::info!(
            telescope,
            telescope_added = report.telescope_added,
            instrument_added = report.instrument_added,
            "instrument ingest finished"
        );
        Ok(report)
    }
}
