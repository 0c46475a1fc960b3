//! Application service — container start use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{ContainerRuntime, ProgressReporter, Prompter};
use crate::application::services::container::lifecycle;
use crate::domain::container::ContainerState;

const RESTART: usize = 0;
const RECREATE: usize = 1;

/// Outcome of the `start_workspace` use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Container was already running; no run request was issued.
    AlreadyRunning { attached: bool },
    /// Container was freshly created (and the image built first if missing).
    Created { built: bool },
    /// The stopped container was started again.
    Restarted,
    /// The paused container was resumed.
    Unpaused,
    /// The stopped container was removed and created again with a new workspace.
    Recreated,
    /// The user declined every offered transition.
    Cancelled,
}

/// Start the container, creating it if needed.
///
/// Precondition order: running → offer attach; paused → unpause; stopped →
/// offer restart or recreate; absent → build the image if missing, then run.
///
/// # Errors
///
/// Returns an error if the runtime is unavailable, the workspace path does
/// not exist, or any runtime command fails.
pub async fn start_workspace(
    rt: &impl ContainerRuntime,
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    workspace: &Path,
) -> Result<StartOutcome> {
    lifecycle::ensure_runtime(rt).await?;
    let container = rt.resources().container.clone();

    match lifecycle::state(rt).await {
        ContainerState::Running => {
            reporter.warn(&format!("container {container} is already running"));
            if prompter.confirm("Attach to it now?", false)? {
                lifecycle::attach(rt).await?;
                return Ok(StartOutcome::AlreadyRunning { attached: true });
            }
            Ok(StartOutcome::AlreadyRunning { attached: false })
        }
        ContainerState::Paused => {
            reporter.step(&format!("container {container} is paused, resuming it..."));
            lifecycle::unpause(rt).await?;
            reporter.success(&format!("container {container} running"));
            Ok(StartOutcome::Unpaused)
        }
        ContainerState::Stopped => {
            let choice = prompter.select(
                &format!("Container {container} exists but is stopped"),
                &[
                    "Restart existing container",
                    "Recreate with this workspace (models are kept)",
                    "Cancel",
                ],
                RESTART,
            )?;
            match choice {
                RESTART => {
                    reporter.step(&format!("starting container {container}..."));
                    lifecycle::start(rt).await?;
                    reporter.success(&format!("container {container} running"));
                    Ok(StartOutcome::Restarted)
                }
                RECREATE => {
                    let host = lifecycle::resolve_workspace(workspace)?;
                    reporter.step(&format!("removing container {container}..."));
                    lifecycle::remove(rt).await?;
                    lifecycle::run(rt, reporter, &host).await?;
                    Ok(StartOutcome::Recreated)
                }
                _ => Ok(StartOutcome::Cancelled),
            }
        }
        ContainerState::Absent => {
            let host = lifecycle::resolve_workspace(workspace)?;
            let built = if lifecycle::image_exists(rt).await {
                false
            } else {
                reporter.step("image not found, building it first");
                lifecycle::build(rt, reporter, false).await?;
                true
            };
            lifecycle::run(rt, reporter, &host).await?;
            Ok(StartOutcome::Created { built })
        }
    }
}
