//! `agentbox stop` — stop the container, keeping the model volume.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::workspace_stop::{self as service, StopOutcome};

/// Run `agentbox stop`.
///
/// # Errors
///
/// Returns an error if the container cannot be stopped.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let ctx = &app.output;
    let outcome =
        service::stop_workspace(&app.runtime, &app.prompter, &app.terminal_reporter()).await?;

    match outcome {
        StopOutcome::NotFound => {
            ctx.info("No container to stop.");
            ctx.info("Create one: agentbox start");
        }
        StopOutcome::AlreadyStopped => {
            ctx.info("Container is already stopped.");
            ctx.info("Resume: agentbox start");
        }
        StopOutcome::Stopped { removed: false } => ctx.info("Resume: agentbox start"),
        StopOutcome::Stopped { removed: true } => ctx.info("Create a new one: agentbox start"),
    }
    Ok(ExitCode::SUCCESS)
}
