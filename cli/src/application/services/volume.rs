//! Application service — model volume report and guarded deletion.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{
    ContainerInspector, ProgressReporter, Prompter, RuntimeProbe, VolumeStore,
};
use crate::application::services::container::lifecycle;
use crate::domain::container::ContainerState;
use crate::domain::volume::VolumeSize;

/// Read-only view of the model volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeReport {
    pub name: String,
    pub present: bool,
    pub size: VolumeSize,
    pub container: String,
    pub container_state: ContainerState,
}

impl VolumeReport {
    /// The runtime refuses to delete a volume referenced by a container.
    #[must_use]
    pub fn in_use(&self) -> bool {
        self.present && self.container_state.exists()
    }
}

/// Outcome of `delete_volume`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeOutcome {
    /// There is no volume to delete.
    Absent,
    /// A container still references the volume.
    InUse,
    /// A confirmation was declined or did not match.
    Kept,
    Deleted,
}

/// Gather the volume report.
///
/// # Errors
///
/// Returns an error if the runtime is unavailable.
pub async fn volume_report(
    rt: &(impl VolumeStore + ContainerInspector + RuntimeProbe),
) -> Result<VolumeReport> {
    lifecycle::ensure_runtime(rt).await?;
    let size = lifecycle::volume_size(rt).await;
    let res = rt.resources();
    Ok(VolumeReport {
        name: res.volume.clone(),
        present: size != VolumeSize::NotCreated,
        size,
        container: res.container.clone(),
        container_state: lifecycle::state(rt).await,
    })
}

/// Delete the model volume after two distinct confirmations.
///
/// The first is a yes/no question defaulting to "no"; the second requires
/// typing the exact volume name. Either failing keeps the volume.
///
/// # Errors
///
/// Returns an error if a prompt fails or the runtime rejects the removal.
pub async fn delete_volume(
    rt: &impl VolumeStore,
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    report: &VolumeReport,
) -> Result<VolumeOutcome> {
    if !report.present {
        return Ok(VolumeOutcome::Absent);
    }
    if report.in_use() {
        return Ok(VolumeOutcome::InUse);
    }

    let name = &report.name;
    if !prompter.confirm(
        &format!("Delete volume {name} and every downloaded model in it?"),
        false,
    )? {
        return Ok(VolumeOutcome::Kept);
    }
    let typed = prompter.input(&format!("Type the volume name ({name}) to confirm"))?;
    if typed.trim() != name {
        reporter.warn("confirmation did not match, volume kept");
        return Ok(VolumeOutcome::Kept);
    }

    tracing::info!(volume = %name, "removing volume");
    let output = rt.volume_remove().await.context("removing volume")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to remove volume: {}", stderr.trim());
    }
    reporter.success(&format!("volume {name} deleted"));
    Ok(VolumeOutcome::Deleted)
}
