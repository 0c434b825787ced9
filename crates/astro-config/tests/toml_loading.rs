//! TOML loading and provider precedence, sandboxed with `figment::Jail`.

use astro_config::AstroConfig;
use astro_core::enums::SpectrumKey;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "catalogue.sqlite"

[ads]
token = "toml-token"

[ingest]
search_radius_arcsec = 5.0
raise_on_error = false
spectra_duplicate_keys = ["reference", "observation_date"]
"#,
        )?;

        let config: AstroConfig = Figment::from(Serialized::defaults(AstroConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "catalogue.sqlite");
        assert!(config.ads.is_configured());
        assert!((config.ingest.search_radius_arcsec - 5.0).abs() < f64::EPSILON);
        assert!(!config.ingest.raise_on_error);
        assert!(config.ingest.raise_on_ambiguity);
        assert_eq!(
            config.ingest.spectra_duplicate_keys,
            vec![SpectrumKey::Reference, SpectrumKey::ObservationDate]
        );
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".astrodb")?;
        jail.create_file(
            ".astrodb/config.toml",
            r#"
[svo]
base_url = "http://localhost:8080/fps.php"
"#,
        )?;

        let config = AstroConfig::load().expect("config loads");
        assert_eq!(config.svo.base_url, "http://localhost:8080/fps.php");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[simbad]
enabled = true
"#,
        )?;
        jail.set_env("ASTRODB_SIMBAD__ENABLED", "false");

        let config: AstroConfig = Figment::from(Serialized::defaults(AstroConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("ASTRODB_").split("__"))
            .extract()?;

        assert!(!config.simbad.enabled);
        Ok(())
    });
}

#[test]
fn invalid_toml_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".astrodb")?;
        jail.create_file(
            ".astrodb/config.toml",
            r#"
[ingest]
search_radius_arcsec = -1.0
"#,
        )?;

        let err = AstroConfig::load().unwrap_err();
        assert!(err.to_string().contains("search_radius_arcsec"));
        Ok(())
    });
}
