// src/engine/report.rs

//! User-facing result reporting and the acknowledgment pause.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use tokio::io::{AsyncBufReadExt, BufReader};

use tracing::error;

use crate::config::BuildConfig;
use crate::errors::{PackagerError, Result};
use crate::types::BuildOutcome;

use super::orchestrator::BuildReport;

pub const FAILURE_MESSAGE: &str = "Build FAILED! Check the errors above.";
pub const SUCCESS_MESSAGE: &str = "Build complete!";
pub const PAUSE_MESSAGE: &str = "Press Enter to continue . . .";

/// Blocks until the user acknowledges the result.
pub trait Prompt: Send {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Waits for a line on stdin. EOF and Ctrl-C acknowledge too.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            print!("{PAUSE_MESSAGE}");
            std::io::stdout().flush()?;

            let mut line = String::new();
            let mut stdin = BufReader::new(tokio::io::stdin());
            tokio::select! {
                res = stdin.read_line(&mut line) => {
                    res?;
                }
                _ = tokio::signal::ctrl_c() => {}
            }
            Ok(())
        })
    }
}

/// Never waits; used with `--no-pause`.
#[derive(Debug, Default)]
pub struct NoPause;

impl Prompt for NoPause {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}

/// Print the outcome, wait for acknowledgment, and return the process exit
/// status: 0 on success, 1 on failure.
pub async fn report_result<W, P>(
    report: &BuildReport,
    build: &BuildConfig,
    out: &mut W,
    prompt: &mut P,
) -> Result<i32>
where
    W: Write + ?Sized,
    P: Prompt + ?Sized,
{
    match report.outcome {
        BuildOutcome::Success => {
            writeln!(out)?;
            writeln!(out, "{SUCCESS_MESSAGE}")?;
            writeln!(out, "Executable: {}", build.output_path().display())?;
        }
        BuildOutcome::Failure(code) => {
            writeln!(out)?;
            writeln!(out, "{FAILURE_MESSAGE} (exit code {code})")?;
        }
    }
    out.flush()?;

    prompt.pause().await?;

    Ok(report.exit_status())
}

/// Print an error that stopped the run, wait for acknowledgment, and return
/// exit status 1.
///
/// `Interrupted` is handed back unchanged: the user already chose to leave.
pub async fn report_error<W, P>(err: PackagerError, out: &mut W, prompt: &mut P) -> Result<i32>
where
    W: Write + ?Sized,
    P: Prompt + ?Sized,
{
    if matches!(err, PackagerError::Interrupted) {
        return Err(err);
    }

    error!(error = %err, "packaging run aborted");
    writeln!(out)?;
    writeln!(out, "{FAILURE_MESSAGE}")?;
    writeln!(out, "{err}")?;
    out.flush()?;

    prompt.pause().await?;

    Ok(1)
}
