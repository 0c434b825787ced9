//! End-to-end source ingest against a fresh on-disk catalogue.

use astro_config::IngestConfig;
use astro_core::entities::{Publication, SourceCandidate};
use astro_core::enums::MatchClass;
use astro_core::observer::Silent;
use astro_core::reports::{SourceBatchReport, SourceOutcome};
use astro_core::services::Offline;
use astro_db::{AstroService, IngestError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

async fn catalogue() -> (TempDir, AstroService) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("astrodb.sqlite");
    let svc = AstroService::new_local(path.to_str().expect("utf-8 path"))
        .await
        .expect("open catalogue");
    svc.insert_publication(&Publication::keyed("Ref1"))
        .await
        .expect("seed publication");
    (dir, svc)
}

fn v4046() -> SourceCandidate {
    SourceCandidate::named("V4046 Sgr", "Ref1").at(273.54, -32.79)
}

#[tokio::test]
async fn first_source_gets_its_self_alias() {
    let (_dir, svc) = catalogue().await;
    let outcome = svc
        .ingest_source(&v4046(), &Offline, &IngestConfig::default())
        .await
        .expect("ingest");

    assert_eq!(
        outcome,
        SourceOutcome::Added {
            source: "V4046 Sgr".into()
        }
    );
    assert_eq!(svc.source_names().await.unwrap(), vec!["V4046 Sgr"]);
    assert_eq!(svc.aliases_of("V4046 Sgr").await.unwrap(), vec!["V4046 Sgr"]);
}

#[tokio::test]
async fn padded_name_matches_the_stored_source_exactly() {
    let (_dir, svc) = catalogue().await;
    svc.ingest_source(&v4046(), &Offline, &IngestConfig::default())
        .await
        .expect("seed source");
    let before = svc.table_counts().await.unwrap();

    let outcome = svc
        .ingest_source(
            &SourceCandidate::named("  V4046 Sgr ", "Ref1"),
            &Offline,
            &IngestConfig::default(),
        )
        .await
        .expect("ingest");

    assert_eq!(
        outcome,
        SourceOutcome::AlreadyPresent {
            source: "V4046 Sgr".into()
        }
    );
    assert_eq!(svc.aliases_of("V4046 Sgr").await.unwrap(), vec!["V4046 Sgr"]);
    assert_eq!(svc.table_counts().await.unwrap(), before);
}

#[tokio::test]
async fn repeating_a_batch_changes_nothing() {
    let (_dir, svc) = catalogue().await;
    let batch = vec![
        v4046(),
        SourceCandidate::named("TWA 27", "Ref1").at(181.88, -39.55),
    ];
    let config = IngestConfig::default();

    let first = svc
        .ingest_sources(&batch, &Offline, &config, &Silent)
        .await
        .unwrap();
    assert_eq!(first.added, 2);

    let before = svc.table_counts().await.unwrap();
    let second = svc
        .ingest_sources(&batch, &Offline, &config, &Silent)
        .await
        .unwrap();
    assert_eq!(
        second,
        SourceBatchReport {
            total: 2,
            existing: 2,
            ..SourceBatchReport::default()
        }
    );
    assert_eq!(svc.table_counts().await.unwrap(), before);

    let lookup = svc
        .find_source("TWA 27", None, &Offline, config.search_radius_arcsec)
        .await
        .unwrap();
    assert_eq!(lookup.resolution.class, MatchClass::Unique);
}

#[tokio::test]
async fn unsearched_names_are_all_new() {
    let (_dir, svc) = catalogue().await;
    let config = IngestConfig {
        search_db: false,
        ..IngestConfig::default()
    };
    let batch: Vec<SourceCandidate> = (0..5)
        .map(|i| SourceCandidate::named(format!("Field Star {i}"), "Ref1").at(10.0 + f64::from(i), 5.0))
        .collect();

    let report = svc
        .ingest_sources(&batch, &Offline, &config, &Silent)
        .await
        .unwrap();
    assert_eq!(report.added, 5);
    assert_eq!(report.self_aliases_added, 5);
    for i in 0..5 {
        let name = format!("Field Star {i}");
        assert_eq!(svc.aliases_of(&name).await.unwrap(), vec![name]);
    }
}

#[tokio::test]
async fn ambiguous_candidate_aborts_without_writes() {
    let (_dir, svc) = catalogue().await;
    // Two sources in the same cone.
    let seed = vec![
        SourceCandidate::named("2MASS J1207-3932 A", "Ref1").at(181.889, -39.548),
        SourceCandidate::named("2MASS J1207-3932 B", "Ref1").at(181.8891, -39.5481),
    ];
    svc.ingest_sources(
        &seed,
        &Offline,
        &IngestConfig {
            search_db: false,
            ..IngestConfig::default()
        },
        &Silent,
    )
    .await
    .unwrap();
    let before = svc.table_counts().await.unwrap();

    let batch = vec![SourceCandidate::named("TWA 27", "Ref1").at(181.889, -39.548)];
    let err = svc
        .ingest_sources(&batch, &Offline, &IngestConfig::default(), &Silent)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Ambiguous { ref matches, .. } if matches.len() == 2));
    assert_eq!(svc.table_counts().await.unwrap(), before);
}
