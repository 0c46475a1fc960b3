//! `agentbox build` / `agentbox rebuild` — build the container image.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::container::lifecycle;

/// Run `agentbox build`, or `agentbox rebuild` when `no_cache` is set.
///
/// # Errors
///
/// Returns an error if the runtime is unavailable or the build fails.
pub async fn run(app: &AppContext, no_cache: bool) -> Result<ExitCode> {
    let rt = &app.runtime;
    lifecycle::ensure_runtime(rt).await?;
    lifecycle::build(rt, &app.terminal_reporter(), no_cache).await?;

    if lifecycle::state(rt).await.exists() {
        app.output
            .info("The existing container still uses the previous image.");
        app.output
            .hint("Recreate", "agentbox stop && agentbox delete && agentbox start");
    }
    Ok(ExitCode::SUCCESS)
}
