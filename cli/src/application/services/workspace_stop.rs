//! Application service — stop and delete use-cases.
//!
//! Neither use-case can remove the model volume: they only reach
//! `ContainerLifecycle`, which has no volume operation.

use anyhow::Result;

use crate::application::ports::{
    ContainerInspector, ContainerLifecycle, ProgressReporter, Prompter, RuntimeProbe,
};
use crate::application::services::container::lifecycle;
use crate::domain::container::ContainerState;
use crate::domain::error::ControllerError;

/// Outcome of `stop_workspace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No container to stop.
    NotFound,
    /// Container was already stopped.
    AlreadyStopped,
    /// Container was stopped, and removed if the user confirmed.
    Stopped { removed: bool },
}

/// Outcome of `delete_container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    Deleted,
}

/// Stop the running or paused container, then offer (not force) its deletion.
///
/// # Errors
///
/// Returns an error if the runtime is unavailable or a runtime command fails.
pub async fn stop_workspace(
    rt: &(impl ContainerLifecycle + ContainerInspector + RuntimeProbe),
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
) -> Result<StopOutcome> {
    lifecycle::ensure_runtime(rt).await?;
    let container = rt.resources().container.clone();

    match lifecycle::state(rt).await {
        ContainerState::Absent => Ok(StopOutcome::NotFound),
        ContainerState::Stopped => Ok(StopOutcome::AlreadyStopped),
        ContainerState::Running | ContainerState::Paused => {
            reporter.step(&format!("stopping container {container}..."));
            tracing::info!(%container, "stopping container");
            lifecycle::stop(rt).await?;
            reporter.success(&format!(
                "container {container} stopped, volume {} kept",
                rt.resources().volume
            ));

            let removed = if prompter.confirm(
                "Also delete the container? Downloaded models are kept",
                false,
            )? {
                lifecycle::remove(rt).await?;
                reporter.success(&format!("container {container} deleted"));
                true
            } else {
                false
            };
            Ok(StopOutcome::Stopped { removed })
        }
    }
}

/// Remove the stopped container. Never cascades to the volume.
///
/// # Errors
///
/// Returns `ControllerError::ContainerRunning` when the container is running,
/// or an error if the runtime is unavailable or the remove command fails.
pub async fn delete_container(
    rt: &(impl ContainerLifecycle + ContainerInspector + RuntimeProbe),
    reporter: &impl ProgressReporter,
) -> Result<DeleteOutcome> {
    lifecycle::ensure_runtime(rt).await?;
    let container = rt.resources().container.clone();

    match lifecycle::state(rt).await {
        ContainerState::Absent => Ok(DeleteOutcome::NotFound),
        ContainerState::Running | ContainerState::Paused => {
            Err(ControllerError::ContainerRunning(container).into())
        }
        ContainerState::Stopped => {
            tracing::info!(%container, "removing container");
            lifecycle::remove(rt).await?;
            reporter.success(&format!("container {container} deleted"));
            Ok(DeleteOutcome::Deleted)
        }
    }
}
