// src/engine/mod.rs

//! Packaging run orchestration.
//!
//! - [`orchestrator`] sequences check, install and build against a
//!   [`ToolBackend`](crate::exec::ToolBackend).
//! - [`report`] turns the outcome into user-facing output, the pause and the
//!   final exit status.

pub mod orchestrator;
pub mod report;

pub use orchestrator::{BuildReport, Orchestrator, OrchestratorOptions};
pub use report::{NoPause, Prompt, StdinPrompt, report_error, report_result};
