//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AgentboxConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<AgentboxConfig> {
    store.load()
}

/// Validate and persist a single setting. Returns the updated configuration.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the file cannot be written.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AgentboxConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
