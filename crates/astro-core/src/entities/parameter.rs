use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError, limits};

/// Entry of the `parameter_list` vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Parameter {
    pub parameter: String,
    pub description: Option<String>,
}

impl Parameter {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("parameter", &self.parameter, limits::PARAMETER)?;
        validation::optional("description", self.description.as_deref(), limits::DESCRIPTION)?;
        Ok(())
    }
}

/// A physical parameter derived from a model fit, such as `T_eff` or `log g`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ModeledParameter {
    pub source: String,
    pub model: Option<String>,
    pub parameter: String,
    pub value: f64,
    pub error: Option<f64>,
    pub unit: Option<String>,
    pub comments: Option<String>,
    pub reference: String,
}

impl ModeledParameter {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("source", &self.source, limits::SOURCE)?;
        validation::optional("model", self.model.as_deref(), limits::MODEL)?;
        validation::required("parameter", &self.parameter, limits::PARAMETER)?;
        validation::finite("value", self.value)?;
        validation::optional("unit", self.unit.as_deref(), limits::UNIT)?;
        validation::optional("comments", self.comments.as_deref(), limits::COMMENTS)?;
        validation::required("reference", &self.reference, limits::REFERENCE)?;
        Ok(())
    }
}
