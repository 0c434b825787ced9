use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError, limits};

/// An observing facility.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Telescope {
    pub telescope: String,
    pub description: Option<String>,
    pub reference: Option<String>,
}

impl Telescope {
    #[must_use]
    pub fn named(telescope: impl Into<String>) -> Self {
        Self {
            telescope: telescope.into(),
            description: None,
            reference: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("telescope", &self.telescope, limits::TELESCOPE)?;
        validation::optional("description", self.description.as_deref(), limits::DESCRIPTION)?;
        validation::optional("reference", self.reference.as_deref(), limits::REFERENCE)?;
        Ok(())
    }
}

/// An instrument mode mounted on a telescope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Instrument {
    pub instrument: String,
    pub mode: String,
    pub telescope: String,
    pub description: Option<String>,
    pub reference: Option<String>,
}

impl Instrument {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("instrument", &self.instrument, limits::INSTRUMENT)?;
        validation::required("mode", &self.mode, limits::MODE)?;
        validation::required("telescope", &self.telescope, limits::TELESCOPE)?;
        validation::optional("description", self.description.as_deref(), limits::DESCRIPTION)?;
        validation::optional("reference", self.reference.as_deref(), limits::REFERENCE)?;
        Ok(())
    }
}
