//! Internal commands (`_entrypoint`, `_pull-models`).
//!
//! These run inside the container, not on the host.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{model_download, model_server};
use crate::domain::ModelSet;
use crate::domain::config::ModelsConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::ollama::{HttpReadiness, OllamaCli};

/// Arguments for the container entrypoint.
#[derive(Args)]
pub struct EntrypointArgs {
    /// Foreground command run once the model server is up
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, default_value = "bash")]
    pub shell: Vec<String>,
}

/// Arguments for the in-container model pull.
#[derive(Args)]
pub struct PullModelsArgs {
    /// Model set, used when no explicit ids are given
    #[arg(default_value = "default")]
    pub mode: ModelSet,

    /// Model id to pull; repeatable, replaces the set's list
    #[arg(long = "model", value_name = "ID")]
    pub models: Vec<String>,
}

impl PullModelsArgs {
    /// Explicit ids when given, otherwise the set from `config`.
    #[must_use]
    pub fn resolve(&self, config: &ModelsConfig) -> Vec<String> {
        if self.models.is_empty() {
            config.for_set(self.mode)
        } else {
            self.models.clone()
        }
    }
}

/// Container entrypoint: supervise the model server around a foreground shell.
///
/// # Errors
///
/// Returns an error if the server or shell cannot be spawned.
pub async fn entrypoint(app: &AppContext, args: &EntrypointArgs) -> Result<ExitCode> {
    let shell: Vec<&str> = args.shell.iter().map(String::as_str).collect();
    let code = model_server::supervise(
        &TokioCommandRunner::default(),
        &HttpReadiness::from_env(),
        &app.terminal_reporter(),
        &shell,
        model_server::ReadyPolicy::default(),
    )
    .await?;
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Pull the models of the requested set that are not installed yet.
///
/// # Errors
///
/// Returns an error if the model server cannot list installed models.
pub async fn pull_models(app: &AppContext, args: &PullModelsArgs) -> Result<ExitCode> {
    let models = args.resolve(&app.config.models);
    let summary =
        model_download::pull_missing(&OllamaCli::default_runner(), &app.terminal_reporter(), &models)
            .await?;

    if summary.is_success() {
        app.output.success(&format!(
            "{} pulled, {} already installed",
            summary.pulled.len(),
            summary.skipped.len()
        ));
        Ok(ExitCode::SUCCESS)
    } else {
        app.output
            .error(&format!("failed to pull: {}", summary.failed.join(", ")));
        Ok(ExitCode::FAILURE)
    }
}
