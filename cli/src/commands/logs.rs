//! `agentbox logs` — show container logs.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::container::lifecycle;

/// Arguments for the logs command.
#[derive(Args)]
pub struct LogsArgs {
    /// Number of lines to show from the end
    #[arg(long, default_value_t = 100)]
    pub tail: u32,

    /// Stream logs in real time
    #[arg(short, long)]
    pub follow: bool,
}

/// Run `agentbox logs`.
///
/// # Errors
///
/// Returns an error if the container does not exist.
pub async fn run(app: &AppContext, args: &LogsArgs) -> Result<ExitCode> {
    lifecycle::ensure_runtime(&app.runtime).await?;
    lifecycle::show_logs(&app.runtime, args.tail, args.follow).await?;
    Ok(ExitCode::SUCCESS)
}
