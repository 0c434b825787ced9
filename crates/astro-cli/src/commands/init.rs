use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `astrodb init`. Opening the catalogue already ran the migrations,
/// so this reports what is there.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tables = ctx.service.table_counts().await?;
    tracing::info!(path = %ctx.config.database.path, "catalogue ready");
    output(
        &json!({
            "database": ctx.config.database.path,
            "tables": tables
                .into_iter()
                .map(|(table, rows)| json!({ "table": table, "rows": rows }))
                .collect::<Vec<_>>(),
        }),
        flags.format,
    )
}
