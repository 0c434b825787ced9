use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `astrodb check`. Exits non-zero when any check finds a problem.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let violations = ctx.service.check_contents().await?;
    output(&violations, flags.format)?;
    if !violations.is_empty() {
        bail!("{} content check violations", violations.len());
    }
    Ok(())
}
