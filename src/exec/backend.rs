// src/exec/backend.rs

//! Pluggable tool backend abstraction.
//!
//! The orchestrator talks to a `ToolBackend` instead of spawning processes
//! itself. Production uses [`ProcessBackend`]; tests can provide a fake that
//! records calls and returns scripted exit codes.

use std::future::Future;
use std::pin::Pin;

use crate::config::ToolConfig;
use crate::errors::Result;
use crate::types::ToolStatus;

use super::command::{check_command, run_streaming};

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The three external actions a packaging run can take.
pub trait ToolBackend: Send {
    /// Check whether the packaging tool is usable. Must not have side effects.
    fn check_presence<'a>(&'a mut self, tool: &'a ToolConfig) -> BackendFuture<'a, ToolStatus>;

    /// Install the packaging tool. Returns the installer's exit code.
    fn install<'a>(&'a mut self, tool: &'a ToolConfig) -> BackendFuture<'a, i32>;

    /// Invoke the packaging tool with `args`. Returns its exit code.
    fn run_build<'a>(
        &'a mut self,
        tool: &'a ToolConfig,
        args: Vec<String>,
    ) -> BackendFuture<'a, i32>;
}

/// Real backend: spawns child processes with `tokio::process`.
#[derive(Debug, Default, Clone)]
pub struct ProcessBackend;

impl ProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ToolBackend for ProcessBackend {
    fn check_presence<'a>(&'a mut self, tool: &'a ToolConfig) -> BackendFuture<'a, ToolStatus> {
        Box::pin(async move {
            let present = check_command(&tool.program, &tool.check).await;
            Ok(if present {
                ToolStatus::Present
            } else {
                ToolStatus::Absent
            })
        })
    }

    fn install<'a>(&'a mut self, tool: &'a ToolConfig) -> BackendFuture<'a, i32> {
        Box::pin(async move {
            let (program, args) = tool
                .install
                .split_first()
                .ok_or_else(|| anyhow::anyhow!("empty install command"))?;
            Ok(run_streaming("install", program, args).await)
        })
    }

    fn run_build<'a>(
        &'a mut self,
        tool: &'a ToolConfig,
        args: Vec<String>,
    ) -> BackendFuture<'a, i32> {
        Box::pin(async move { Ok(run_streaming("build", &tool.program, &args).await) })
    }
}
