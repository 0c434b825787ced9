use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError, limits};

/// A bibliographic reference, keyed by a short reference string such as `Smit21`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Publication {
    pub reference: String,
    pub bibcode: Option<String>,
    pub doi: Option<String>,
    pub description: Option<String>,
}

impl Publication {
    /// Publication with only a reference key.
    #[must_use]
    pub fn keyed(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            bibcode: None,
            doi: None,
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::required("reference", &self.reference, limits::REFERENCE)?;
        validation::optional("bibcode", self.bibcode.as_deref(), limits::BIBCODE)?;
        validation::optional("doi", self.doi.as_deref(), limits::DOI)?;
        validation::optional("description", self.description.as_deref(), limits::DESCRIPTION)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_required() {
        assert_eq!(
            Publication::keyed("").validate(),
            Err(ValidationError::Missing { field: "reference" })
        );
        assert!(Publication::keyed("Ref1").validate().is_ok());
    }

    #[test]
    fn description_is_bounded() {
        let publication = Publication {
            description: Some("x".repeat(1001)),
            ..Publication::keyed("Ref1")
        };
        assert!(publication.validate().is_err());
    }
}
