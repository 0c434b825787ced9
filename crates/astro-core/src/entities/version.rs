use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError, limits};

/// A released version of the database contents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Version {
    pub version: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl Version {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("version", &self.version, limits::VERSION)?;
        validation::optional("start_date", self.start_date.as_deref(), limits::VERSION)?;
        validation::optional("end_date", self.end_date.as_deref(), limits::VERSION)?;
        validation::optional("description", self.description.as_deref(), limits::DESCRIPTION)?;
        Ok(())
    }
}
