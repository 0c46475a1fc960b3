//! `agentbox volume` — inspect the model volume and optionally delete it.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::volume::{self as service, VolumeOutcome};
use crate::output::{human, json};

/// Run `agentbox volume`.
///
/// # Errors
///
/// Returns an error if the runtime is unavailable or the removal fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let report = service::volume_report(&app.runtime).await?;

    if app.is_json() {
        json::print(&report)?;
        return Ok(ExitCode::SUCCESS);
    }
    human::render_volume(&app.output, &report);

    let outcome =
        service::delete_volume(&app.runtime, &app.prompter, &app.terminal_reporter(), &report)
            .await?;
    match outcome {
        VolumeOutcome::Absent => app.output.info("Nothing to delete."),
        VolumeOutcome::InUse => app
            .output
            .info("Delete the container first: agentbox stop && agentbox delete"),
        VolumeOutcome::Kept => app.output.info("Volume kept."),
        VolumeOutcome::Deleted => app
            .output
            .info("Models will be downloaded again on the next: agentbox download"),
    }
    Ok(ExitCode::SUCCESS)
}
