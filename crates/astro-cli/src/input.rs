//! JSONL batch files.

use std::path::Path;

use anyhow::Context;
use astro_schema::SchemaRegistry;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read every line of a JSONL file. When `schema` is given each line is
/// checked against that registered schema first, so a bad line is reported
/// with every violation instead of the first serde error.
pub fn read_batch<T: DeserializeOwned>(path: &Path, schema: Option<&str>) -> anyhow::Result<Vec<T>> {
    let lines = serde_jsonlines::json_lines::<Value, _>(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .collect::<std::io::Result<Vec<Value>>>()
        .with_context(|| format!("{} is not valid JSONL", path.display()))?;

    let registry = schema.map(|_| SchemaRegistry::new());
    let mut records = Vec::with_capacity(lines.len());
    for (index, line) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        if let (Some(registry), Some(name)) = (&registry, schema) {
            registry
                .validate(name, &line)
                .with_context(|| format!("{} line {line_no}", path.display()))?;
        }
        let record = serde_json::from_value(line)
            .with_context(|| format!("{} line {line_no}", path.display()))?;
        records.push(record);
    }
    tracing::debug!(path = %path.display(), count = records.len(), "batch file read");
    Ok(records)
}
