//! Integration tests for agentbox CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them need a container runtime: the runtime binary is pointed at
//! a name that does not exist.

mod config_command;
