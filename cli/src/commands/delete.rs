//! `agentbox delete` — remove the stopped container. The model volume is kept.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Prompter;
use crate::application::services::container::lifecycle;
use crate::application::services::workspace_stop::{self as service, DeleteOutcome};
use crate::domain::ContainerState;

/// Run `agentbox delete`.
///
/// # Errors
///
/// Returns an error if the container is running or cannot be removed.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let ctx = &app.output;
    let container = app.container_name();

    lifecycle::ensure_runtime(&app.runtime).await?;
    if lifecycle::state(&app.runtime).await == ContainerState::Stopped
        && !app.prompter.confirm(
            &format!("Delete container {container}? Downloaded models are kept"),
            app.non_interactive,
        )?
    {
        ctx.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    match service::delete_container(&app.runtime, &app.terminal_reporter()).await? {
        DeleteOutcome::NotFound => ctx.info("No container to delete."),
        DeleteOutcome::Deleted => ctx.info("Create a new one: agentbox start"),
    }
    Ok(ExitCode::SUCCESS)
}
