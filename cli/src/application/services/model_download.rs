//! Application service — model downloads.
//!
//! `download_models` runs on the host and delegates to the in-container
//! routine; `pull_missing` is that routine, talking to the model server CLI.

use anyhow::{Context, Result};

use crate::application::ports::{
    ContainerInspector, ContainerSession, ModelServer, ProgressReporter, RuntimeProbe,
};
use crate::application::services::container::lifecycle;
use crate::domain::container::IN_CONTAINER_BIN;
use crate::domain::models::{ModelSet, is_installed, parse_installed};

/// Hidden subcommand name of the in-container routine.
pub const PULL_SUBCOMMAND: &str = "_pull-models";

/// Flag carrying one resolved model id to the in-container routine.
pub const MODEL_FLAG: &str = "--model";

/// Result of one `pull_missing` pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PullSummary {
    pub pulled: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl PullSummary {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// In-container command line pulling exactly `models`.
///
/// The ids are resolved on the host so that model lists from the host
/// configuration reach the container unchanged.
#[must_use]
pub fn pull_command(set: ModelSet, models: &[String]) -> Vec<String> {
    let mut args = vec![
        IN_CONTAINER_BIN.to_string(),
        PULL_SUBCOMMAND.to_string(),
        set.as_str().to_string(),
    ];
    for model in models {
        args.push(MODEL_FLAG.to_string());
        args.push(model.clone());
    }
    args
}

/// Run the idempotent download routine for `models` inside the running container.
///
/// # Errors
///
/// Returns `ContainerNotRunning` if the container is not running, or an
/// error if the in-container routine fails.
pub async fn download_models(
    rt: &(impl ContainerSession + ContainerInspector + RuntimeProbe),
    set: ModelSet,
    models: &[String],
) -> Result<()> {
    lifecycle::ensure_runtime(rt).await?;
    lifecycle::require_running(rt).await?;
    tracing::info!(mode = %set, ?models, "downloading models in container");
    let args = pull_command(set, models);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let status = rt
        .exec_interactive(&args)
        .await
        .context("running model download in container")?;
    if !status.success() {
        anyhow::bail!("model download did not complete ({status})");
    }
    Ok(())
}

/// Pull every model in `models` that is not installed yet.
///
/// Each id is fetched at most once per call; ids already present are
/// reported and skipped.
///
/// # Errors
///
/// Returns an error if the installed-model list cannot be read.
pub async fn pull_missing(
    server: &impl ModelServer,
    reporter: &impl ProgressReporter,
    models: &[String],
) -> Result<PullSummary> {
    let output = server.list().await.context("listing installed models")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("model server did not answer: {}", stderr.trim());
    }
    let mut installed = parse_installed(&String::from_utf8_lossy(&output.stdout));
    let mut summary = PullSummary::default();

    for model in models {
        if is_installed(&installed, model) {
            reporter.success(&format!("{model} already installed"));
            summary.skipped.push(model.clone());
            continue;
        }
        reporter.step(&format!("pulling {model}..."));
        match server.pull(model).await {
            Ok(status) if status.success() => {
                reporter.success(&format!("{model} installed"));
                installed.push(model.clone());
                summary.pulled.push(model.clone());
            }
            Ok(status) => {
                reporter.warn(&format!("{model} failed ({status})"));
                summary.failed.push(model.clone());
            }
            Err(e) => {
                reporter.warn(&format!("{model} failed: {e}"));
                summary.failed.push(model.clone());
            }
        }
    }
    Ok(summary)
}
