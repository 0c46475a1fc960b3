//! `agentbox status` — summary of every managed resource.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::status::gather_status;
use crate::output::{human, json, progress};

/// Run `agentbox status`.
///
/// Exits with failure when the container runtime is unreachable.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let report = progress::with_spinner(
        app.output.show_progress(),
        "Checking status...",
        gather_status(&app.runtime),
    )
    .await;

    if app.is_json() {
        json::print(&report)?;
    } else {
        human::render_status(&app.output, &report);
    }

    Ok(if report.runtime_available {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
