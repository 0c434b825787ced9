//! The documented table manifest and the migrated store describe the same
//! tables and columns.

use astro_db::AstroDb;
use astro_schema::TABLES;

async fn columns_of(db: &AstroDb, table: &str) -> Vec<String> {
    let mut rows = db
        .conn()
        .query("SELECT name FROM pragma_table_info(?1)", [table])
        .await
        .expect("pragma query");
    let mut names = Vec::new();
    while let Some(row) = rows.next().await.expect("row") {
        names.push(row.get::<String>(0).expect("column name"));
    }
    names
}

#[tokio::test]
async fn every_manifest_column_exists() {
    let db = AstroDb::open_local(":memory:").await.expect("open");
    for table in TABLES {
        let stored = columns_of(&db, table.name).await;
        assert!(!stored.is_empty(), "table {} is missing", table.name);
        for column in table.columns {
            assert!(
                stored.iter().any(|name| name == column.name),
                "{}.{} is documented but not stored",
                table.name,
                column.name
            );
        }
    }
}

#[tokio::test]
async fn every_stored_column_is_documented() {
    let db = AstroDb::open_local(":memory:").await.expect("open");
    for table in TABLES {
        for name in columns_of(&db, table.name).await {
            assert!(
                table.column(&name).is_some(),
                "{}.{name} is stored but not documented",
                table.name
            );
        }
    }
}
