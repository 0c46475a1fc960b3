//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Controller errors ─────────────────────────────────────────────────────────

/// Errors raised by container lifecycle transitions.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Container runtime '{0}' is not available. Is the daemon running?")]
    RuntimeUnavailable(String),

    #[error("Workspace path not found: {0}")]
    PathNotFound(String),

    #[error("Container '{0}' is not running. Run 'agentbox start' first.")]
    ContainerNotRunning(String),

    #[error("Container '{0}' does not exist. Run 'agentbox start' to create it.")]
    ContainerNotFound(String),

    #[error("Container '{0}' is running. Stop it first: agentbox stop")]
    ContainerRunning(String),
}

impl ControllerError {
    /// Returns `true` for errors that must abort the whole session,
    /// not just the current transition.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RuntimeUnavailable(_))
    }

    /// Stable machine-readable code for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RuntimeUnavailable(_) => "RUNTIME_UNAVAILABLE",
            Self::PathNotFound(_) => "PATH_NOT_FOUND",
            Self::ContainerNotRunning(_) => "CONTAINER_NOT_RUNNING",
            Self::ContainerNotFound(_) => "CONTAINER_NOT_FOUND",
            Self::ContainerRunning(_) => "CONTAINER_RUNNING",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
