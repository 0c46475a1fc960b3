//! Application context — unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` from the global flags and the loaded
//! configuration; command handlers receive `&AppContext`.

use anyhow::Result;

use crate::application::ports::Resources;
use crate::application::services::config_service;
use crate::domain::config::AgentboxConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::docker::DockerRuntime;
use crate::infra::prompt::DialoguerPrompter;
use crate::output::{OutputContext, TerminalReporter};

/// Overrides `runtime.binary` for a single invocation.
pub const RUNTIME_ENV: &str = "AGENTBOX_RUNTIME";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Skip interactive prompts (also set by `CI` / `AGENTBOX_YES` env vars).
    pub yes: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Loaded configuration.
    pub config: AgentboxConfig,
    /// Where the configuration lives.
    pub config_store: YamlConfigStore,
    /// Container runtime handle bound to the configured resource names.
    pub runtime: DockerRuntime<TokioCommandRunner>,
    /// Terminal prompts.
    pub prompter: DialoguerPrompter,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("AGENTBOX_YES").is_ok();
        let non_interactive = flags.yes || ci_env;

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore::from_env();
        let mut config = config_service::load_config(&config_store)?;
        if let Ok(binary) = std::env::var(RUNTIME_ENV) {
            config.runtime.binary = binary;
        }
        tracing::debug!(?config, "configuration loaded");

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            runtime: DockerRuntime::default_runner(Resources::from_config(&config)),
            config,
            config_store,
            prompter: DialoguerPrompter::new(non_interactive),
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Configured container name.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.config.container.name
    }

    /// Progress reporter for application services.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
