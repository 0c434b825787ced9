//! Serde roundtrip and JsonSchema validation for the catalogue records.

use astro_core::entities::*;
use astro_core::enums::*;
use astro_core::reports::*;
use chrono::NaiveDate;
use schemars::schema_for;

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    source_roundtrip,
    Source,
    Source {
        source: "V4046 Sgr".into(),
        ra_deg: Some(273.54),
        dec_deg: Some(-32.79),
        epoch_year: Some(2000.0),
        equinox: Some("J2000".into()),
        shortname: None,
        reference: "Ref1".into(),
        other_references: None,
        comments: Some("Circumbinary disk host".into()),
    }
);

roundtrip_and_validate!(
    alias_roundtrip,
    Alias,
    Alias {
        source: "V4046 Sgr".into(),
        other_name: "HD 319139".into(),
    }
);

roundtrip_and_validate!(
    publication_roundtrip,
    Publication,
    Publication {
        reference: "Smit21".into(),
        bibcode: Some("2021AJ....161...42S".into()),
        doi: Some("10.3847/1538-3881/abc123".into()),
        description: Some("A survey of nearby young stars".into()),
    }
);

roundtrip_and_validate!(
    filter_roundtrip,
    PhotometryFilter,
    PhotometryFilter {
        band: "2MASS.J".into(),
        ucd: Some("em.IR.J".into()),
        effective_wavelength_angstroms: 12_350.0,
        width_angstroms: Some(1_624.32),
    }
);

roundtrip_and_validate!(
    photometry_roundtrip,
    Photometry,
    Photometry {
        source: "TWA 27".into(),
        band: "2MASS.J".into(),
        magnitude: 13.0,
        magnitude_error: Some(0.03),
        telescope: Some("2MASS".into()),
        epoch: None,
        comments: None,
        reference: "Cutr03".into(),
        regime: Some(Regime::NirUcd),
    }
);

roundtrip_and_validate!(
    spectrum_roundtrip,
    Spectrum,
    Spectrum {
        source: "TWA 27".into(),
        access_url: "https://example.org/twa27.fits".into(),
        original_spectrum: None,
        local_spectrum: None,
        regime: Regime::Nir,
        telescope: Some("IRTF".into()),
        instrument: Some("SpeX".into()),
        mode: Some("Prism".into()),
        observation_date: NaiveDate::from_ymd_opt(2013, 3, 2)
            .unwrap()
            .and_hms_opt(5, 17, 31)
            .unwrap(),
        comments: None,
        reference: "Burg10".into(),
    }
);

roundtrip_and_validate!(
    companion_roundtrip,
    CompanionRelationship,
    CompanionRelationship {
        source: "TWA 27".into(),
        companion_name: "TWA 27b".into(),
        relationship: Relationship::Parent,
        projected_separation_arcsec: Some(0.78),
        projected_separation_error: None,
        comments: None,
        reference: Some("Chau04".into()),
    }
);

roundtrip_and_validate!(
    source_report_roundtrip,
    SourceBatchReport,
    SourceBatchReport {
        total: 3,
        added: 1,
        existing: 1,
        ambiguous: 0,
        skipped: 1,
        self_aliases_added: 1,
        alt_aliases_added: 1,
    }
);

roundtrip_and_validate!(
    source_outcome_roundtrip,
    SourceOutcome,
    SourceOutcome::AliasAdded {
        source: "V4046 Sgr".into(),
        alias: "HD 319139".into(),
        stage: MatchStage::Resolver,
    }
);
