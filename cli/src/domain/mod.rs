//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod container;
pub mod error;
pub mod models;
pub mod volume;

pub use config::{AgentboxConfig, validate_config_key, validate_config_value};
pub use container::{ContainerState, RunSpec, normalize_host_path};
pub use error::{ConfigError, ControllerError};
pub use models::ModelSet;
pub use volume::VolumeSize;
