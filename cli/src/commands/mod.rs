//! Command implementations

pub mod attach;
pub mod build;
pub mod config;
pub mod delete;
pub mod download;
pub mod internal;
pub mod logs;
pub mod menu;
pub mod start;
pub mod status;
pub mod stop;
pub mod volume;
