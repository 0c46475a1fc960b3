//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Manage the agentbox container: AI coding agents and a local model server
#[derive(Parser)]
#[command(name = "agentbox", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honours the NO_COLOR environment variable)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer every prompt with its default
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the container image from the current directory
    Build,

    /// Rebuild the container image without cache
    Rebuild,

    /// Start the container, building and creating it if needed
    Start(commands::start::StartArgs),

    /// Stop the container (downloaded models are kept)
    Stop,

    /// Delete the stopped container (downloaded models are kept)
    Delete,

    /// Attach to the running container
    Attach,

    /// Open an additional shell in the running container
    Shell,

    /// Show container logs
    Logs(commands::logs::LogsArgs),

    /// Download models into the persistent volume
    Download(commands::download::DownloadArgs),

    /// Show image, container, volume, and GPU status
    Status,

    /// Show the model volume and optionally delete it
    Volume,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Interactive menu (default when no command is given)
    Menu,

    #[command(hide = true, name = "_entrypoint")]
    Entrypoint(commands::internal::EntrypointArgs),

    #[command(hide = true, name = "_pull-models")]
    PullModels(commands::internal::PullModelsArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
            ..
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            yes,
        })?;

        match command.unwrap_or(Command::Menu) {
            Command::Build => commands::build::run(&app, false).await,
            Command::Rebuild => commands::build::run(&app, true).await,
            Command::Start(args) => commands::start::run(&app, &args).await,
            Command::Stop => commands::stop::run(&app).await,
            Command::Delete => commands::delete::run(&app).await,
            Command::Attach => commands::attach::attach(&app).await,
            Command::Shell => commands::attach::shell(&app).await,
            Command::Logs(args) => commands::logs::run(&app, &args).await,
            Command::Download(args) => commands::download::run(&app, &args).await,
            Command::Status => commands::status::run(&app).await,
            Command::Volume => commands::volume::run(&app).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Menu => commands::menu::run(&app).await,
            Command::Entrypoint(args) => commands::internal::entrypoint(&app, &args).await,
            Command::PullModels(args) => commands::internal::pull_models(&app, &args).await,
        }
    }
}
