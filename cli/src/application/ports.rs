//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

use crate::domain::{AgentboxConfig, RunSpec};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Names of the external resources the controller manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    /// Runtime CLI binary, e.g. `docker`.
    pub runtime: String,
    /// Container name.
    pub container: String,
    /// Image reference.
    pub image: String,
    /// Persistent model volume name.
    pub volume: String,
}

impl Resources {
    #[must_use]
    pub fn from_config(config: &AgentboxConfig) -> Self {
        Self {
            runtime: config.runtime.binary.clone(),
            container: config.container.name.clone(),
            image: config.container.image.clone(),
            volume: config.volume.name.clone(),
        }
    }
}

// ── Container Runtime Port Traits ─────────────────────────────────────────────

/// Identity and reachability of the container runtime.
#[allow(async_fn_in_trait)]
pub trait RuntimeProbe {
    /// Resource names this runtime handle is bound to.
    fn resources(&self) -> &Resources;
    /// Query the runtime daemon (`docker info`).
    async fn ping(&self) -> Result<Output>;
}

/// Image operations.
#[allow(async_fn_in_trait)]
pub trait ImageStore {
    /// Inspect the configured image; success means it exists.
    async fn image_inspect(&self) -> Result<Output>;
    /// Build the configured image from the current directory with inherited stdio.
    async fn build(&self, no_cache: bool) -> Result<ExitStatus>;
}

/// Container lifecycle operations: create, start, stop, remove.
///
/// There is deliberately no operation here that can touch a volume.
#[allow(async_fn_in_trait)]
pub trait ContainerLifecycle {
    /// Create and start a new container from `spec`.
    async fn run(&self, spec: &RunSpec) -> Result<Output>;
    /// Start the existing stopped container.
    async fn start(&self) -> Result<Output>;
    /// Stop the running container.
    async fn stop(&self) -> Result<Output>;
    /// Resume the paused container.
    async fn unpause(&self) -> Result<Output>;
    /// Remove the container resource only.
    async fn remove(&self) -> Result<Output>;
}

/// Container state inspection.
#[allow(async_fn_in_trait)]
pub trait ContainerInspector {
    /// `State.Status` of the container; failure means it does not exist.
    async fn inspect_status(&self) -> Result<Output>;
}

/// Interactive sessions against the container, all with inherited stdio.
#[allow(async_fn_in_trait)]
pub trait ContainerSession {
    /// Attach the terminal to the container's main process.
    async fn attach(&self) -> Result<ExitStatus>;
    /// Run an interactive command inside the container.
    async fn exec_interactive(&self, args: &[&str]) -> Result<ExitStatus>;
    /// Print container logs.
    async fn logs(&self, tail: u32, follow: bool) -> Result<ExitStatus>;
}

/// Named volume operations.
#[allow(async_fn_in_trait)]
pub trait VolumeStore {
    /// Inspect the configured volume; success means it exists.
    async fn volume_inspect(&self) -> Result<Output>;
    /// Runtime disk usage report (`docker system df -v`).
    async fn disk_usage(&self) -> Result<Output>;
    /// Remove the configured volume.
    async fn volume_remove(&self) -> Result<Output>;
}

/// Host GPU detection.
#[allow(async_fn_in_trait)]
pub trait GpuProbe {
    /// Query the host GPU driver (`nvidia-smi`).
    async fn gpu_query(&self) -> Result<Output>;
}

/// Composite trait — any type implementing all sub-traits is a `ContainerRuntime`.
pub trait ContainerRuntime:
    RuntimeProbe
    + ImageStore
    + ContainerLifecycle
    + ContainerInspector
    + ContainerSession
    + VolumeStore
    + GpuProbe
{
}

/// Blanket implementation: any type implementing all sub-traits is a `ContainerRuntime`.
impl<T> ContainerRuntime for T where
    T: RuntimeProbe
        + ImageStore
        + ContainerLifecycle
        + ContainerInspector
        + ContainerSession
        + VolumeStore
        + GpuProbe
{
}

// ── Model Server Ports ────────────────────────────────────────────────────────

/// Model server CLI as seen from inside the container.
#[allow(async_fn_in_trait)]
pub trait ModelServer {
    /// List installed models (`ollama list`).
    async fn list(&self) -> Result<Output>;
    /// Fetch a model (`ollama pull`), streaming progress to the terminal.
    async fn pull(&self, model: &str) -> Result<ExitStatus>;
}

/// Reachability check for the model server's HTTP endpoint.
#[allow(async_fn_in_trait)]
pub trait ReadinessProbe {
    /// Returns `true` once the server answers.
    async fn is_ready(&self) -> bool;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Spawn a program in the background without waiting for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn spawn(&self, program: &str, args: &[&str]) -> Result<tokio::process::Child>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Abstracts user prompts so services can be driven by scripted answers.
pub trait Prompter {
    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    /// Pick one of `items`; returns its index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
    /// Free-text answer. Non-interactive implementations return an empty string.
    fn input(&self, prompt: &str) -> Result<String>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<AgentboxConfig>;
    /// Persist the configuration.
    fn save(&self, config: &AgentboxConfig) -> Result<()>;
    /// Resolved configuration file path.
    fn path(&self) -> Result<PathBuf>;
}
