use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use ca_packager::config::{ConfigFile, ToolConfig};
use ca_packager::engine::{BuildReport, Orchestrator, OrchestratorOptions, Prompt};
use ca_packager::finish;
use ca_packager::errors::Result;
use ca_packager::exec::{BackendFuture, ToolBackend};
use ca_packager::fs::mock::MockFileSystem;
use ca_packager::types::ToolStatus;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckPresence,
    Install,
    RunBuild(Vec<String>),
}

/// Environment state shared across fake backends, so consecutive runs see
/// what earlier runs installed.
#[derive(Debug, Clone, Default)]
pub struct FakeEnvironment {
    inner: Arc<Mutex<EnvState>>,
}

#[derive(Debug, Default)]
struct EnvState {
    tool_installed: bool,
    calls: Vec<Call>,
}

impl FakeEnvironment {
    pub fn with_tool(installed: bool) -> Self {
        let env = Self::default();
        env.inner.lock().unwrap().tool_installed = installed;
        env
    }

    pub fn tool_installed(&self) -> bool {
        self.inner.lock().unwrap().tool_installed
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn install_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Install).count()
    }

    pub fn build_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::RunBuild(args) => Some(args),
                _ => None,
            })
            .collect()
    }
}

/// A fake tool backend that:
/// - records every call in the shared [`FakeEnvironment`]
/// - marks the tool installed when the scripted install code is 0
/// - returns a scripted exit code for the build, optionally writing the
///   artifact into a mock working directory on success.
pub struct FakeBackend {
    env: FakeEnvironment,
    install_exit_code: i32,
    build_exit_code: i32,
    artifact: Option<(MockFileSystem, std::path::PathBuf)>,
}

impl FakeBackend {
    pub fn new(env: FakeEnvironment) -> Self {
        Self {
            env,
            install_exit_code: 0,
            build_exit_code: 0,
            artifact: None,
        }
    }

    pub fn install_exit_code(mut self, code: i32) -> Self {
        self.install_exit_code = code;
        self
    }

    pub fn build_exit_code(mut self, code: i32) -> Self {
        self.build_exit_code = code;
        self
    }

    /// On a zero build exit code, create `path` in `fs`.
    pub fn writes_artifact(mut self, fs: MockFileSystem, path: impl Into<std::path::PathBuf>) -> Self {
        self.artifact = Some((fs, path.into()));
        self
    }

    fn record(&self, call: Call) {
        self.env.inner.lock().unwrap().calls.push(call);
    }
}

impl ToolBackend for FakeBackend {
    fn check_presence<'a>(&'a mut self, _tool: &'a ToolConfig) -> BackendFuture<'a, ToolStatus> {
        Box::pin(async move {
            self.record(Call::CheckPresence);
            Ok(if self.env.tool_installed() {
                ToolStatus::Present
            } else {
                ToolStatus::Absent
            })
        })
    }

    fn install<'a>(&'a mut self, _tool: &'a ToolConfig) -> BackendFuture<'a, i32> {
        Box::pin(async move {
            self.record(Call::Install);
            if self.install_exit_code == 0 {
                self.env.inner.lock().unwrap().tool_installed = true;
            }
            Ok(self.install_exit_code)
        })
    }

    fn run_build<'a>(
        &'a mut self,
        _tool: &'a ToolConfig,
        args: Vec<String>,
    ) -> BackendFuture<'a, i32> {
        Box::pin(async move {
            self.record(Call::RunBuild(args));
            if self.build_exit_code == 0 {
                if let Some((fs, path)) = &self.artifact {
                    fs.add_file(path);
                }
            }
            Ok(self.build_exit_code)
        })
    }
}

/// Prompt that counts pauses instead of reading stdin.
#[derive(Debug, Clone, Default)]
pub struct CountingPrompt {
    pauses: Arc<Mutex<usize>>,
}

impl CountingPrompt {
    pub fn pauses(&self) -> usize {
        *self.pauses.lock().unwrap()
    }
}

impl Prompt for CountingPrompt {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let pauses = Arc::clone(&self.pauses);
        Box::pin(async move {
            *pauses.lock().unwrap() += 1;
            Ok(())
        })
    }
}

/// What one orchestrated run produced, as seen by the user.
#[derive(Debug)]
pub struct RunOutput {
    /// `None` when the run stopped with an error.
    pub report: Option<BuildReport>,
    pub code: i32,
    pub output: String,
    pub pauses: usize,
}

/// Run the orchestrator once against `backend` and report the result the
/// way the binary does.
pub async fn run_and_report(
    cfg: &ConfigFile,
    backend: FakeBackend,
    fs: MockFileSystem,
    options: OrchestratorOptions,
) -> Result<RunOutput> {
    let mut orchestrator = Orchestrator::new(backend, Arc::new(fs), options);
    let result = orchestrator.run(cfg).await;
    let report = result.as_ref().ok().cloned();

    let mut out = Vec::new();
    let mut prompt = CountingPrompt::default();
    let code = finish(result, &cfg.build, &mut out, &mut prompt).await?;

    Ok(RunOutput {
        report,
        code,
        output: String::from_utf8_lossy(&out).into_owned(),
        pauses: prompt.pauses(),
    })
}
