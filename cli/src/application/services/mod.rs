//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod container;
pub mod model_download;
pub mod model_server;
pub mod status;
pub mod volume;
pub mod workspace_start;
pub mod workspace_stop;
