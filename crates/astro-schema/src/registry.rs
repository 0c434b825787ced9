//! JSON Schemas of the `astro-core` records.
//!
//! Built once with [`schemars::schema_for!`]. The CLI uses the registry to
//! export schemas and to check batch input lines before deserializing them.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap_or_default());
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        use astro_core::{entities, reports, resolution};

        let mut schemas = HashMap::new();

        register!(schemas, "source", entities::Source);
        register!(schemas, "source_candidate", entities::SourceCandidate);
        register!(schemas, "alias", entities::Alias);
        register!(schemas, "publication", entities::Publication);
        register!(schemas, "telescope", entities::Telescope);
        register!(schemas, "instrument", entities::Instrument);
        register!(schemas, "photometry_filter", entities::PhotometryFilter);
        register!(schemas, "photometry", entities::Photometry);
        register!(schemas, "parallax", entities::Parallax);
        register!(schemas, "proper_motion", entities::ProperMotion);
        register!(schemas, "radial_velocity", entities::RadialVelocity);
        register!(
            schemas,
            "companion_relationship",
            entities::CompanionRelationship
        );
        register!(schemas, "parameter", entities::Parameter);
        register!(schemas, "modeled_parameter", entities::ModeledParameter);
        register!(schemas, "spectrum", entities::Spectrum);
        register!(schemas, "version", entities::Version);

        register!(schemas, "resolution", resolution::Resolution);
        register!(schemas, "source_outcome", reports::SourceOutcome);
        register!(schemas, "source_batch_report", reports::SourceBatchReport);
        register!(
            schemas,
            "photometry_batch_report",
            reports::PhotometryBatchReport
        );
        register!(schemas, "spectra_batch_report", reports::SpectraBatchReport);
        register!(schemas, "filter_outcome", reports::FilterOutcome);

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// `SchemaError::NotFound` for an unknown name, `SchemaError::ValidationFailed`
    /// with every violation otherwise.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_has_every_record() {
        let registry = SchemaRegistry::new();
        assert_eq!(registry.schema_count(), 22);
        assert!(registry.list().contains(&"source_candidate"));
    }

    #[test]
    fn list_is_sorted() {
        let names = SchemaRegistry::new().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn candidate_line_validates() {
        let registry = SchemaRegistry::new();
        let line = json!({"source": "V4046 Sgr", "reference": "Ref1", "ra_deg": 273.54, "dec_deg": -32.79});
        assert!(registry.validate("source_candidate", &line).is_ok());
    }

    #[test]
    fn candidate_without_name_fails() {
        let registry = SchemaRegistry::new();
        let err = registry
            .validate("source_candidate", &json!({"reference": "Ref1"}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));
    }

    #[test]
    fn photometry_with_string_magnitude_fails() {
        let registry = SchemaRegistry::new();
        let line = json!({"source": "TWA 27", "band": "2MASS.J", "magnitude": "13.0", "reference": "Cutr03"});
        assert!(registry.validate("photometry", &line).is_err());
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let registry = SchemaRegistry::new();
        assert!(matches!(
            registry.validate("comet", &json!({})),
            Err(SchemaError::NotFound(_))
        ));
    }
}
