//! Mermaid entity-relation diagram of the manifest.

use crate::manifest::Table;

/// Render an `erDiagram` block: one entity per table, one relation per
/// foreign key whose parent is also rendered (many children to exactly one
/// parent).
#[must_use]
pub fn render_mermaid(tables: &[Table]) -> String {
    let mut lines = vec!["erDiagram".to_string()];
    for table in tables {
        lines.push(format!("    {} {{", table.name));
        for column in table.columns {
            let mut markers = Vec::new();
            if column.primary_key {
                markers.push("PK");
            }
            if table
                .foreign_keys()
                .any(|fk| fk.columns.contains(&column.name))
            {
                markers.push("FK");
            }
            let markers = if markers.is_empty() {
                String::new()
            } else {
                format!(" {}", markers.join(","))
            };
            lines.push(format!(
                "        {} {}{markers}",
                column.datatype.as_str(),
                column.name
            ));
        }
        lines.push("    }".to_string());
    }
    for table in tables {
        for fk in table.foreign_keys() {
            let parent = fk
                .referenced_table
                .filter(|parent| tables.iter().any(|t| t.name == *parent));
            if let Some(parent) = parent {
                lines.push(format!(
                    "    {parent} ||--o{{ {} : \"{}\"",
                    table.name,
                    fk.columns.join(", ")
                ));
            }
        }
    }
    lines.join("\n")
}
