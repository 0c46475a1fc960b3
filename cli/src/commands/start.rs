//! `agentbox start [PATH]` — start the container, building and creating it if needed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::workspace_start::{self as service, StartOutcome};
use crate::output::OutputContext;

/// Arguments for the start command.
#[derive(Args, Default)]
pub struct StartArgs {
    /// Host directory mounted at /workspace (defaults to the current directory)
    pub path: Option<PathBuf>,
}

/// Run `agentbox start`.
///
/// # Errors
///
/// Returns an error if the runtime is unavailable, the path does not exist,
/// or a runtime command fails.
pub async fn run(app: &AppContext, args: &StartArgs) -> Result<ExitCode> {
    let workspace = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let outcome = service::start_workspace(
        &app.runtime,
        &app.prompter,
        &app.terminal_reporter(),
        &workspace,
    )
    .await?;
    print_outcome(&app.output, outcome, app.container_name());
    Ok(ExitCode::SUCCESS)
}

/// Print the follow-up hints for a start outcome.
pub fn print_outcome(ctx: &OutputContext, outcome: StartOutcome, container: &str) {
    match outcome {
        StartOutcome::AlreadyRunning { attached: true } => {}
        StartOutcome::AlreadyRunning { attached: false } => {
            ctx.info(&format!("{container} is running."));
            ctx.hint("Attach", "agentbox attach");
            ctx.hint("Shell ", "agentbox shell");
        }
        StartOutcome::Created { .. }
        | StartOutcome::Restarted
        | StartOutcome::Unpaused
        | StartOutcome::Recreated => {
            ctx.success(&format!("{container} is ready."));
            ctx.hint("Attach", "agentbox attach");
            ctx.hint("Models", "agentbox download minimal");
        }
        StartOutcome::Cancelled => ctx.info("Cancelled."),
    }
}
