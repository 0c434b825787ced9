//! Markdown documentation of the manifest, one page per table.

use std::path::{Path, PathBuf};

use crate::error::SchemaError;
use crate::manifest::{Constraint, Table};

/// Render the page for one table.
#[must_use]
pub fn render_table(table: &Table) -> String {
    let mut lines = vec![
        format!("## {}", table.name),
        "### Description".to_string(),
        table.description.to_string(),
        "### Columns".to_string(),
        "| Column | Datatype | Length | Description | UCD | Nullable |".to_string(),
        "| --- | --- | --- | --- | --- | --- |".to_string(),
    ];
    for column in table.columns {
        let name = if column.primary_key {
            format!("*{}*", column.name)
        } else {
            column.name.to_string()
        };
        lines.push(format!(
            "| {name} | {} | {} | {} | {} | {} |",
            column.datatype,
            column.length.map(|l| l.to_string()).unwrap_or_default(),
            escape(column.description),
            column.ucd.unwrap_or_default(),
            if column.nullable { "True" } else { "False" },
        ));
    }
    lines.push(String::new());

    if !table.indexes.is_empty() {
        lines.push("### Indexes".to_string());
        lines.push("| Name | Columns | Description |".to_string());
        lines.push("| --- | --- | --- |".to_string());
        for index in table.indexes {
            lines.push(format!(
                "| {} | {} | {} |",
                index.name,
                index.columns.join(", "),
                escape(index.description)
            ));
        }
        lines.push(String::new());
    }

    if !table.constraints.is_empty() {
        lines.push("### Constraints".to_string());
        lines.push("| Type | Description | Columns | Referenced Columns |".to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for constraint in table.constraints {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                constraint.kind.as_str(),
                escape(constraint.description),
                constraint.columns.join(", "),
                referenced(constraint)
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn referenced(constraint: &Constraint) -> String {
    constraint.referenced_table.map_or_else(String::new, |table| {
        constraint
            .referenced_columns
            .iter()
            .map(|column| format!("{table}.{column}"))
            .collect::<Vec<_>>()
            .join(", ")
    })
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Write `<table>.md` for every table into `dir`, creating it if needed.
/// Returns the written paths in manifest order.
pub fn write_all(tables: &[Table], dir: &Path) -> Result<Vec<PathBuf>, SchemaError> {
    std::fs::create_dir_all(dir).map_err(|source| SchemaError::Write {
        path: dir.display().to_string(),
        source,
    })?;
    tables
        .iter()
        .map(|table| {
            let path = dir.join(format!("{}.md", table.name));
            std::fs::write(&path, render_table(table)).map_err(|source| SchemaError::Write {
                path: path.display().to_string(),
                source,
            })?;
            Ok(path)
        })
        .collect()
}
