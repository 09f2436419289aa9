// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::config::{BuildConfig, ConfigFile, resolve_config};
use crate::engine::{
    BuildReport, NoPause, Orchestrator, OrchestratorOptions, Prompt, StdinPrompt, report_error,
    report_result,
};
use crate::errors::{PackagerError, Result};
use crate::exec::{ProcessBackend, ToolBackend, display_command};
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`. Returns the process exit
/// status.
pub async fn run(args: CliArgs) -> Result<i32> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::current_dir());
    let mut prompt: Box<dyn Prompt> = if args.no_pause {
        Box::new(NoPause)
    } else {
        Box::new(StdinPrompt)
    };
    let mut stdout = std::io::stdout();

    run_with(&args, ProcessBackend::new(), fs, &mut stdout, prompt.as_mut()).await
}

/// [`run`] with the backend, working directory, output and prompt supplied
/// by the caller.
///
/// This wires together:
/// - config resolution
/// - dry-run printing
/// - the orchestrator, interruptible with Ctrl-C
/// - result reporting and the acknowledgment pause
///
/// Every failure except Ctrl-C is reported on `out` and paused on, then
/// mapped to exit status 1.
pub async fn run_with<B, W, P>(
    args: &CliArgs,
    backend: B,
    fs: Arc<dyn FileSystem>,
    out: &mut W,
    prompt: &mut P,
) -> Result<i32>
where
    B: ToolBackend,
    W: Write + ?Sized,
    P: Prompt + ?Sized,
{
    let cfg = match resolve_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return report_error(err, out, prompt).await,
    };

    if args.dry_run {
        print_dry_run(&cfg, out)?;
        return Ok(0);
    }

    let options = OrchestratorOptions {
        install_missing: !args.skip_install,
    };
    let mut orchestrator = Orchestrator::new(backend, fs, options);

    // Ctrl-C drops the running step; children are spawned with
    // `kill_on_drop`, so they go with it. The pause below is not covered.
    let result = tokio::select! {
        res = orchestrator.run(&cfg) => res,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("interrupted; aborting packaging run");
            Err(PackagerError::Interrupted)
        }
    };

    finish(result, &cfg.build, out, prompt).await
}

/// Report a finished run (or the error that stopped it) and return the exit
/// status.
pub async fn finish<W, P>(
    result: Result<BuildReport>,
    build: &BuildConfig,
    out: &mut W,
    prompt: &mut P,
) -> Result<i32>
where
    W: Write + ?Sized,
    P: Prompt + ?Sized,
{
    let code = match result {
        Ok(report) => report_result(&report, build, out, prompt).await?,
        Err(err) => report_error(err, out, prompt).await?,
    };
    debug!(exit_status = code, "packaging run reported");
    Ok(code)
}

/// Dry-run output: the commands that would run, in order.
pub fn print_dry_run<W: Write + ?Sized>(cfg: &ConfigFile, out: &mut W) -> Result<()> {
    writeln!(out, "ca-packager dry-run")?;
    writeln!(
        out,
        "  check:   {}",
        display_command(&cfg.tool.program, &cfg.tool.check)
    )?;
    if let Some((program, args)) = cfg.tool.install.split_first() {
        writeln!(
            out,
            "  install: {} (only if the check fails)",
            display_command(program, args)
        )?;
    }
    writeln!(
        out,
        "  build:   {}",
        display_command(&cfg.tool.program, &cfg.build.pyinstaller_args())
    )?;
    writeln!(out, "  output:  {}", cfg.build.output_path().display())?;
    out.flush()?;

    debug!("dry-run complete (no execution)");
    Ok(())
}
