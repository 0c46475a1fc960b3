//! `agentbox attach` and `agentbox shell` — interactive sessions.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::container::lifecycle;

/// Run `agentbox attach`. Detach with Ctrl-P Ctrl-Q.
///
/// # Errors
///
/// Returns an error if the container is not running.
pub async fn attach(app: &AppContext) -> Result<ExitCode> {
    lifecycle::ensure_runtime(&app.runtime).await?;
    app.output.info("Detach with Ctrl-P Ctrl-Q to keep the container running.");
    lifecycle::attach(&app.runtime).await?;
    Ok(ExitCode::SUCCESS)
}

/// Run `agentbox shell`.
///
/// # Errors
///
/// Returns an error if the container is not running.
pub async fn shell(app: &AppContext) -> Result<ExitCode> {
    lifecycle::ensure_runtime(&app.runtime).await?;
    lifecycle::open_shell(&app.runtime).await?;
    Ok(ExitCode::SUCCESS)
}
