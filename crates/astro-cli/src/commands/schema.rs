use astro_schema::{SchemaError, SchemaRegistry, TABLES, docs, erd};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SchemaCommands;
use crate::output::output;

/// Handle `astrodb schema`.
pub fn handle(action: &SchemaCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SchemaCommands::Docs { out } => {
            let written = docs::write_all(TABLES, out)?;
            tracing::info!(dir = %out.display(), pages = written.len(), "schema docs written");
            output(
                &written
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>(),
                flags.format,
            )
        }
        SchemaCommands::Erd => {
            println!("{}", erd::render_mermaid(TABLES));
            Ok(())
        }
        SchemaCommands::Json { type_name } => {
            let registry = SchemaRegistry::new();
            if type_name == "list" {
                return output(&json!(registry.list()), flags.format);
            }
            let schema = registry
                .get(type_name)
                .ok_or_else(|| SchemaError::NotFound(type_name.clone()))?;
            output(schema, flags.format)
        }
    }
}
