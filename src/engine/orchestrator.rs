// src/engine/orchestrator.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{BuildConfig, ConfigFile};
use crate::errors::{PackagerError, Result};
use crate::exec::{ToolBackend, display_command};
use crate::fs::FileSystem;
use crate::types::{BuildOutcome, BuildPhase, ToolStatus};

/// Knobs that change orchestration, as opposed to what gets built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Install the packaging tool when the presence check says it is absent. When
    /// false, an absent tool is an error.
    pub install_missing: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            install_missing: true,
        }
    }
}

/// Everything that happened during one packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Phases in the order they were entered; ends with a terminal phase.
    pub phases: Vec<BuildPhase>,
    pub tool_status: ToolStatus,
    /// Installer exit code, `None` when no install was attempted.
    pub install_exit_code: Option<i32>,
    /// Exact argv handed to the packaging tool.
    pub build_args: Vec<String>,
    pub build_exit_code: i32,
    pub outcome: BuildOutcome,
    /// Input files that were not found before the build started.
    pub missing_inputs: Vec<String>,
    /// Whether the artifact was found after a successful build. `None` after
    /// a failed build.
    pub artifact_found: Option<bool>,
}

impl BuildReport {
    pub fn installed(&self) -> bool {
        self.install_exit_code.is_some()
    }

    pub fn exit_status(&self) -> i32 {
        self.outcome.exit_status()
    }
}

/// Linear packaging pipeline:
/// `Start → CheckTool → (InstallTool)? → RunBuild → {Success, Failure}`.
///
/// Each step is awaited to completion before the next one starts.
#[derive(Debug)]
pub struct Orchestrator<B> {
    backend: B,
    fs: Arc<dyn FileSystem>,
    options: OrchestratorOptions,
}

impl<B: ToolBackend> Orchestrator<B> {
    pub fn new(backend: B, fs: Arc<dyn FileSystem>, options: OrchestratorOptions) -> Self {
        Self {
            backend,
            fs,
            options,
        }
    }

    /// Run the full sequence once.
    ///
    /// A non-zero build exit code is reported through
    /// [`BuildReport::outcome`], not as an error. Errors are reserved for the
    /// backend failing to act at all, or a missing tool with installation
    /// disabled.
    pub async fn run(&mut self, cfg: &ConfigFile) -> Result<BuildReport> {
        let mut phases = vec![BuildPhase::Start, BuildPhase::CheckTool];

        let tool_status = self.backend.check_presence(&cfg.tool).await?;
        info!(tool = %cfg.tool.program, ?tool_status, "packaging tool check finished");

        let mut install_exit_code = None;
        if !tool_status.is_present() {
            if !self.options.install_missing {
                return Err(PackagerError::ToolMissing(cfg.tool.program.clone()));
            }

            phases.push(BuildPhase::InstallTool);
            info!(
                cmd = %cfg.tool.install.join(" "),
                "packaging tool not found; installing"
            );
            let code = self.backend.install(&cfg.tool).await?;
            if code != 0 {
                // Not fatal: the build step below surfaces the real failure.
                warn!(exit_code = code, "install command failed; attempting build anyway");
            }
            install_exit_code = Some(code);
        }

        let missing_inputs = self.preflight(&cfg.build);

        phases.push(BuildPhase::RunBuild);
        let build_args = cfg.build.pyinstaller_args();
        info!(cmd = %display_command(&cfg.tool.program, &build_args), "running packaging tool");

        let build_exit_code = self
            .backend
            .run_build(&cfg.tool, build_args.clone())
            .await?;
        let outcome = BuildOutcome::from_exit_code(build_exit_code);

        let artifact_found = match outcome {
            BuildOutcome::Success => Some(self.check_artifact(&cfg.build)),
            BuildOutcome::Failure(_) => None,
        };

        phases.push(outcome.phase());
        debug_assert!(phases.last().is_some_and(|p| p.is_terminal()));
        debug!(?phases, ?outcome, "packaging run finished");

        Ok(BuildReport {
            phases,
            tool_status,
            install_exit_code,
            build_args,
            build_exit_code,
            outcome,
            missing_inputs,
            artifact_found,
        })
    }

    /// Warn about inputs the tool will not find. Never blocks the build.
    fn preflight(&self, build: &BuildConfig) -> Vec<String> {
        let missing: Vec<String> = build
            .input_files()
            .filter(|file| !self.fs.is_file(Path::new(file)))
            .map(str::to_string)
            .collect();

        for file in &missing {
            warn!(file = %file, "input file not found in working directory");
        }
        missing
    }

    fn check_artifact(&self, build: &BuildConfig) -> bool {
        let path = build.output_path();
        let found = self.fs.is_file(&path);
        if !found {
            warn!(
                path = %path.display(),
                "packaging tool reported success but the executable was not found"
            );
        }
        found
    }
}
