//! Container lifecycle primitives: state queries and single-step transitions.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Each function issues at most one runtime command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{
    ContainerInspector, ContainerLifecycle, ContainerSession, GpuProbe, ImageStore,
    ProgressReporter, RuntimeProbe, VolumeStore,
};
use crate::domain::container::{ContainerState, RunSpec, normalize_host_path};
use crate::domain::error::ControllerError;
use crate::domain::volume::{VolumeSize, parse_df_size};

// ── State queries ─────────────────────────────────────────────────────────────

/// Fail with `RuntimeUnavailable` unless the runtime daemon answers.
///
/// # Errors
///
/// Returns `ControllerError::RuntimeUnavailable` when the runtime cannot be
/// spawned or reports an error.
pub async fn ensure_runtime(rt: &impl RuntimeProbe) -> Result<()> {
    let reachable = rt.ping().await.map(|o| o.status.success()).unwrap_or(false);
    if !reachable {
        return Err(ControllerError::RuntimeUnavailable(rt.resources().runtime.clone()).into());
    }
    Ok(())
}

/// Check if the configured image exists locally.
pub async fn image_exists(rt: &impl ImageStore) -> bool {
    rt.image_inspect()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get current container state.
pub async fn state(rt: &impl ContainerInspector) -> ContainerState {
    match rt.inspect_status().await {
        Ok(o) if o.status.success() => {
            let status = String::from_utf8_lossy(&o.stdout);
            if status.trim().is_empty() {
                ContainerState::Stopped
            } else {
                ContainerState::from_status(&status)
            }
        }
        _ => ContainerState::Absent,
    }
}

/// Check if the model volume exists.
pub async fn volume_exists(rt: &impl VolumeStore) -> bool {
    rt.volume_inspect()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Approximate size of the model volume.
pub async fn volume_size(rt: &(impl VolumeStore + RuntimeProbe)) -> VolumeSize {
    if !volume_exists(rt).await {
        return VolumeSize::NotCreated;
    }
    match rt.disk_usage().await {
        Ok(o) if o.status.success() => {
            let report = String::from_utf8_lossy(&o.stdout);
            parse_df_size(&report, &rt.resources().volume)
                .map_or(VolumeSize::Unknown, VolumeSize::Known)
        }
        _ => VolumeSize::Unknown,
    }
}

/// Best-effort GPU detection. Any failure means CPU mode.
pub async fn gpu_available(rt: &impl GpuProbe) -> bool {
    rt.gpu_query()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Fail with `ContainerNotRunning` unless the container is running.
///
/// # Errors
///
/// Returns `ControllerError::ContainerNotRunning` for paused, stopped or absent containers.
pub async fn require_running(rt: &(impl ContainerInspector + RuntimeProbe)) -> Result<()> {
    if state(rt).await != ContainerState::Running {
        return Err(ControllerError::ContainerNotRunning(rt.resources().container.clone()).into());
    }
    Ok(())
}

/// Fail with `ContainerNotFound` unless the container exists.
///
/// # Errors
///
/// Returns `ControllerError::ContainerNotFound` when the container is absent.
pub async fn require_exists(rt: &(impl ContainerInspector + RuntimeProbe)) -> Result<()> {
    if !state(rt).await.exists() {
        return Err(ControllerError::ContainerNotFound(rt.resources().container.clone()).into());
    }
    Ok(())
}

// ── Workspace path ────────────────────────────────────────────────────────────

/// Validate a host workspace path and convert it into runtime path syntax.
///
/// # Errors
///
/// Returns `ControllerError::PathNotFound` if the path does not exist.
pub fn resolve_workspace(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ControllerError::PathNotFound(path.display().to_string()).into());
    }
    let absolute = std::path::absolute(path)
        .with_context(|| format!("resolving {}", path.display()))?;
    let absolute = absolute
        .to_str()
        .with_context(|| format!("workspace path is not valid UTF-8: {}", absolute.display()))?;
    Ok(normalize_host_path(absolute, cfg!(windows)))
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// Build the image from the current directory.
///
/// # Errors
///
/// Returns an error if the build cannot be spawned or exits non-zero.
pub async fn build(
    rt: &(impl ImageStore + RuntimeProbe),
    reporter: &impl ProgressReporter,
    no_cache: bool,
) -> Result<()> {
    let image = &rt.resources().image;
    reporter.step(&format!("building image {image}..."));
    tracing::info!(%image, no_cache, "building image");
    let status = rt.build(no_cache).await.context("building image")?;
    if !status.success() {
        anyhow::bail!("image build failed ({status}). Nothing was changed.");
    }
    reporter.success(&format!("image {image} built"));
    Ok(())
}

/// Create and start the container with `host_workspace` at `/workspace`.
///
/// The model volume is referenced by name; the runtime creates it on first use.
///
/// # Errors
///
/// Returns an error if the run request fails.
pub async fn run(
    rt: &(impl ContainerLifecycle + GpuProbe + RuntimeProbe),
    reporter: &impl ProgressReporter,
    host_workspace: &str,
) -> Result<()> {
    let gpu = gpu_available(rt).await;
    if !gpu {
        reporter.warn("no GPU detected, the model server will run on CPU");
    }
    let res = rt.resources();
    let spec = RunSpec {
        name: res.container.clone(),
        image: res.image.clone(),
        host_workspace: host_workspace.to_string(),
        volume: res.volume.clone(),
        gpu,
    };
    reporter.step(&format!("creating container {}...", spec.name));
    tracing::info!(container = %spec.name, workspace = %spec.host_workspace, gpu, "running container");
    let output = rt.run(&spec).await.context("creating container")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to create container: {}", stderr.trim());
    }
    reporter.success(&format!("container {} running", spec.name));
    Ok(())
}

/// Start the existing stopped container.
///
/// # Errors
///
/// Returns an error if the runtime start command fails.
pub async fn start(rt: &impl ContainerLifecycle) -> Result<()> {
    let output = rt.start().await.context("starting container")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to start container: {}", stderr.trim());
    }
    Ok(())
}

/// Resume the paused container.
///
/// # Errors
///
/// Returns an error if the unpause command fails.
pub async fn unpause(rt: &impl ContainerLifecycle) -> Result<()> {
    let output = rt.unpause().await.context("unpausing container")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to unpause container: {}", stderr.trim());
    }
    Ok(())
}

/// Stop the running container. The volume is never touched.
///
/// # Errors
///
/// Returns an error if the runtime stop command fails.
pub async fn stop(rt: &impl ContainerLifecycle) -> Result<()> {
    let output = rt.stop().await.context("stopping container")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to stop container: {}", stderr.trim());
    }
    Ok(())
}

/// Remove the container resource. The volume is never touched.
///
/// # Errors
///
/// Returns an error if the runtime remove command fails.
pub async fn remove(rt: &impl ContainerLifecycle) -> Result<()> {
    let output = rt.remove().await.context("removing container")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to remove container: {}", stderr.trim());
    }
    Ok(())
}

/// Attach the terminal to the running container.
///
/// # Errors
///
/// Returns `ContainerNotRunning` if the container is not running, or an
/// error if the attach session exits non-zero.
pub async fn attach(rt: &(impl ContainerSession + ContainerInspector + RuntimeProbe)) -> Result<()> {
    require_running(rt).await?;
    let status = rt.attach().await.context("attaching to container")?;
    if !status.success() {
        anyhow::bail!("attach ended with {status}");
    }
    Ok(())
}

/// Open an additional interactive shell in the running container.
///
/// # Errors
///
/// Returns `ContainerNotRunning` if the container is not running, or an
/// error if the shell exits non-zero.
pub async fn open_shell(
    rt: &(impl ContainerSession + ContainerInspector + RuntimeProbe),
) -> Result<()> {
    require_running(rt).await?;
    let status = rt
        .exec_interactive(&["bash"])
        .await
        .context("opening shell in container")?;
    if !status.success() {
        anyhow::bail!("shell in container ended with {status}");
    }
    Ok(())
}

/// Print container logs.
///
/// # Errors
///
/// Returns `ContainerNotFound` if the container does not exist, or an error
/// if the logs command exits non-zero.
pub async fn show_logs(
    rt: &(impl ContainerSession + ContainerInspector + RuntimeProbe),
    tail: u32,
    follow: bool,
) -> Result<()> {
    require_exists(rt).await?;
    let status = rt
        .logs(tail, follow)
        .await
        .context("reading container logs")?;
    if !status.success() {
        anyhow::bail!("reading logs failed ({status})");
    }
    Ok(())
}
