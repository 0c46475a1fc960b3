//! Model sets and installed-model matching.
//!
//! Pure functions only — no I/O, no async.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

pub const MINIMAL_MODELS: &[&str] = &["qwen2.5-coder:1.5b"];
pub const DEFAULT_MODELS: &[&str] = &["qwen2.5-coder:7b", "llama3.2:3b"];
pub const EXTRA_MODELS: &[&str] = &["deepseek-coder-v2:16b", "nomic-embed-text"];

/// Named selection of models to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSet {
    Minimal,
    #[default]
    Default,
    All,
}

impl ModelSet {
    pub const ALL: [ModelSet; 3] = [ModelSet::Minimal, ModelSet::Default, ModelSet::All];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Default => "default",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "default" => Ok(Self::Default),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::InvalidValue {
                key: "mode".to_string(),
                value: s.to_string(),
                valid: "minimal, default, all".to_string(),
            }),
        }
    }
}

/// Parse `ollama list` output into installed model names.
///
/// The first line is a header (`NAME  ID  SIZE  MODIFIED`); the name is the
/// first column of every following row.
#[must_use]
pub fn parse_installed(list_output: &str) -> Vec<String> {
    list_output
        .lines()
        .filter(|line| !line.trim_start().starts_with("NAME"))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Whether `model` is already present in `installed`.
///
/// Matches the exact name, or an untagged id against any tag of it
/// (`llama3.2` matches `llama3.2:latest` and `llama3.2:3b`).
#[must_use]
pub fn is_installed(installed: &[String], model: &str) -> bool {
    installed.iter().any(|name| {
        name == model
            || (!model.contains(':')
                && name
                    .strip_prefix(model)
                    .is_some_and(|rest| rest.starts_with(':')))
    })
}
