//! Container domain types and pure helpers.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! It describes the container state machine and the exact `run` request the
//! controller issues, including the environment contract forwarded into the
//! container.

use std::fmt;

use serde::Serialize;

// ── Constants ────────────────────────────────────────────────────────────────

/// In-container mount point of the host workspace.
pub const WORKSPACE_MOUNT: &str = "/workspace";

/// In-container mount point of the persistent model volume.
pub const MODELS_MOUNT: &str = "/ollama-models";

/// Bind address of the bundled model server. Never published to the host.
pub const MODEL_SERVER_ADDR: &str = "127.0.0.1:11434";

/// Name of this binary inside the image, used for in-container routines.
pub const IN_CONTAINER_BIN: &str = "agentbox";

/// Model server configuration forwarded on every run.
pub const MODEL_SERVER_ENV: &[(&str, &str)] = &[
    ("OLLAMA_FLASH_ATTENTION", "1"),
    ("OLLAMA_NUM_GPU", "999"),
    ("OLLAMA_HOST", MODEL_SERVER_ADDR),
    ("OLLAMA_MODELS", MODELS_MOUNT),
];

/// GPU visibility forwarded only when a GPU was detected on the host.
pub const GPU_ENV: &[(&str, &str)] = &[
    ("NVIDIA_VISIBLE_DEVICES", "all"),
    ("NVIDIA_DRIVER_CAPABILITIES", "compute,utility"),
];

// ── State ────────────────────────────────────────────────────────────────────

/// Container state as observed from the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Absent,
    Stopped,
    Paused,
    Running,
}

impl ContainerState {
    /// Map a runtime `State.Status` string onto the controller states.
    ///
    /// `restarting` counts as running. A paused container must be unpaused
    /// rather than started, so it keeps its own state. Anything else that
    /// exists (created, exited, dead) counts as stopped.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status.trim() {
            "" => Self::Absent,
            "running" | "restarting" => Self::Running,
            "paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }

    #[must_use]
    pub fn exists(self) -> bool {
        self != Self::Absent
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Run request ──────────────────────────────────────────────────────────────

/// Everything needed to create the managed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    /// Container name.
    pub name: String,
    /// Image reference, e.g. `agentbox:latest`.
    pub image: String,
    /// Host workspace path, already normalised for the runtime.
    pub host_workspace: String,
    /// Persistent model volume name.
    pub volume: String,
    /// Request GPU access.
    pub gpu: bool,
}

impl RunSpec {
    /// Environment variables passed with `-e`.
    #[must_use]
    pub fn env(&self) -> Vec<(&'static str, &'static str)> {
        let mut env = MODEL_SERVER_ENV.to_vec();
        if self.gpu {
            env.extend_from_slice(GPU_ENV);
        }
        env
    }

    /// Arguments for `<runtime> run ...`.
    ///
    /// The container runs detached with a TTY so it can be attached later.
    /// No port is ever published: the model server stays container-local.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "run".into(),
            "-dit".into(),
            "--name".into(),
            self.name.clone(),
            "--workdir".into(),
            WORKSPACE_MOUNT.into(),
            "-v".into(),
            format!("{}:{WORKSPACE_MOUNT}", self.host_workspace),
            "-v".into(),
            format!("{}:{MODELS_MOUNT}", self.volume),
        ];
        for (key, value) in self.env() {
            args.push("-e".into());
            args.push(format!("{key}={value}"));
        }
        if self.gpu {
            args.push("--gpus".into());
            args.push("all".into());
        }
        args.push(self.image.clone());
        args
    }
}

// ── Path normalisation ───────────────────────────────────────────────────────

/// Rewrite a host path into the syntax the runtime expects.
///
/// On Windows hosts a drive-letter path (`C:\Users\me`) becomes
/// `/c/Users/me` and a verbatim prefix (`\\?\`) is dropped. On other hosts
/// the path is returned unchanged.
#[must_use]
pub fn normalize_host_path(path: &str, windows: bool) -> String {
    if !windows {
        return path.to_string();
    }
    let trimmed = path.strip_prefix(r"\\?\").unwrap_or(path);
    let slashed = trimmed.replace('\\', "/");
    let bytes = slashed.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let drive = char::from(bytes[0]).to_ascii_lowercase();
        let rest = &slashed[2..];
        if rest.is_empty() {
            return format!("/{drive}/");
        }
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        return format!("/{drive}/{rest}");
    }
    slashed
}
