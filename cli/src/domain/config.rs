//! Domain types and validators for agentbox configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::models::{DEFAULT_MODELS, EXTRA_MODELS, MINIMAL_MODELS, ModelSet};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "runtime.binary",
    "container.name",
    "container.image",
    "volume.name",
];

/// Docker object names: `[a-zA-Z0-9][a-zA-Z0-9_.-]+`.
#[allow(clippy::expect_used)] // Static regex literal, cannot fail at runtime
pub static RESOURCE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]{0,127}$").expect("valid regex"));

/// Image references: optional registry/namespace path, optional tag.
#[allow(clippy::expect_used)] // Static regex literal, cannot fail at runtime
pub static IMAGE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+([._/-][a-z0-9]+)*(:[0-9]+/[a-z0-9]+([._/-][a-z0-9]+)*)?(:[A-Za-z0-9_][A-Za-z0-9_.-]{0,127})?$")
        .expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.agentbox/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentboxConfig {
    pub runtime: RuntimeConfig,
    pub container: ContainerConfig,
    pub volume: VolumeConfig,
    pub models: ModelsConfig,
}

/// Container runtime CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Runtime binary, `docker` by default.
    pub binary: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

/// Managed container identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub name: String,
    pub image: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "agentbox".to_string(),
            image: "agentbox:latest".to_string(),
        }
    }
}

/// Persistent model volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub name: String,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            name: "agentbox-models".to_string(),
        }
    }
}

/// Models installed by each download mode. `all` is appended to `default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub minimal: Vec<String>,
    pub default: Vec<String>,
    pub all: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|m| (*m).to_string()).collect();
        Self {
            minimal: owned(MINIMAL_MODELS),
            default: owned(DEFAULT_MODELS),
            all: owned(EXTRA_MODELS),
        }
    }
}

impl ModelsConfig {
    /// Models to install for `set`, de-duplicated, in declaration order.
    #[must_use]
    pub fn for_set(&self, set: ModelSet) -> Vec<String> {
        let lists: Vec<&Vec<String>> = match set {
            ModelSet::Minimal => vec![&self.minimal],
            ModelSet::Default => vec![&self.default],
            ModelSet::All => vec![&self.default, &self.all],
        };
        let mut out: Vec<String> = Vec::new();
        for model in lists.into_iter().flatten() {
            if !out.contains(model) {
                out.push(model.clone());
            }
        }
        out
    }
}

impl AgentboxConfig {
    /// Read a whitelisted setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "runtime.binary" => Some(&self.runtime.binary),
            "container.name" => Some(&self.container.name),
            "container.image" => Some(&self.container.image),
            "volume.name" => Some(&self.volume.name),
            _ => None,
        }
    }

    /// Validate and apply a whitelisted setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let value = value.to_string();
        match key {
            "runtime.binary" => self.runtime.binary = value,
            "container.name" => self.container.name = value,
            "container.image" => self.container.image = value,
            _ => self.volume.name = value,
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let (ok, valid) = match key {
        "container.name" | "volume.name" => (
            RESOURCE_NAME_RE.is_match(value),
            "letters, digits, '_', '.', '-' (must start with a letter or digit)",
        ),
        "container.image" => (
            IMAGE_REF_RE.is_match(value),
            "an image reference such as agentbox:latest",
        ),
        "runtime.binary" => (
            !value.is_empty() && !value.chars().any(char::is_whitespace),
            "a program name or path without spaces, e.g. docker or podman",
        ),
        _ => return validate_config_key(key),
    };
    if !ok {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: valid.to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
