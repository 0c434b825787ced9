use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Relationship;
use crate::validation::{self, ValidationError, limits};

/// A physical association between a source and a named companion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CompanionRelationship {
    pub source: String,
    pub companion_name: String,
    pub relationship: Relationship,
    pub projected_separation_arcsec: Option<f64>,
    pub projected_separation_error: Option<f64>,
    pub comments: Option<String>,
    pub reference: Option<String>,
}

impl CompanionRelationship {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("source", &self.source, limits::SOURCE)?;
        validation::required("companion_name", &self.companion_name, limits::SOURCE)?;
        if let Some(separation) = self.projected_separation_arcsec {
            validation::non_negative("projected_separation_arcsec", separation)?;
        }
        if let Some(error) = self.projected_separation_error {
            validation::non_negative("projected_separation_error", error)?;
        }
        validation::optional("comments", self.comments.as_deref(), limits::COMMENTS)?;
        validation::optional("reference", self.reference.as_deref(), limits::REFERENCE)?;
        Ok(())
    }
}
