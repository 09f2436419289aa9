// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] spawns child processes with `tokio::process::Command` and
//!   streams their output into the log.
//! - [`backend`] provides the `ToolBackend` trait and the concrete
//!   `ProcessBackend` used in production, which tests replace with a fake.

pub mod backend;
pub mod command;

pub use backend::{BackendFuture, ProcessBackend, ToolBackend};
pub use command::display_command;
