//! `agentbox download [MODE]` — install models into the persistent volume.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::model_download;
use crate::domain::ModelSet;

/// Arguments for the download command.
#[derive(Args)]
pub struct DownloadArgs {
    /// Model set: minimal, default, or all
    #[arg(default_value = "default")]
    pub mode: ModelSet,
}

/// Run `agentbox download`.
///
/// # Errors
///
/// Returns `ContainerNotRunning` if the container is not running, or an
/// error if the download fails.
pub async fn run(app: &AppContext, args: &DownloadArgs) -> Result<ExitCode> {
    let models = app.config.models.for_set(args.mode);
    app.output.info(&format!(
        "Downloading {} model set: {}",
        args.mode,
        models.join(", ")
    ));
    model_download::download_models(&app.runtime, args.mode, &models).await?;
    app.output.success("Models ready.");
    Ok(ExitCode::SUCCESS)
}
