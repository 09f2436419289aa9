// src/exec/command.rs

//! Child process helpers.

use std::io::ErrorKind;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Run `program args` with all output discarded and report whether it exited
/// successfully.
///
/// Any spawn failure (not found, not executable, broken shim) counts as
/// "not successful".
pub async fn check_command(program: &str, args: &[String]) -> bool {
    debug!(program, ?args, "probing for tool");

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await;

    match status {
        Ok(status) => {
            debug!(program, exit_code = ?status.code(), "presence check finished");
            status.success()
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(program, "program not found on PATH");
            false
        }
        Err(e) => {
            warn!(program, error = %e, "failed to start tool; treating it as absent");
            false
        }
    }
}

/// Run a command to completion, forwarding its stdout/stderr line by line to
/// the log, and return its exit code.
///
/// All errors (spawn, wait) are logged and folded into exit code -1, as is
/// termination without an exit code.
pub async fn run_streaming(step: &'static str, program: &str, args: &[String]) -> i32 {
    match run_streaming_inner(step, program, args).await {
        Ok(code) => code,
        Err(err) => {
            error!(step, program, error = %format!("{err:#}"), "command execution error");
            -1
        }
    }
}

async fn run_streaming_inner(step: &'static str, program: &str, args: &[String]) -> Result<i32> {
    info!(step, cmd = %display_command(program, args), "starting process");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning '{program}'"))?;

    let stdout = child.stdout.take().map(|s| forward_lines(step, "stdout", s));
    let stderr = child.stderr.take().map(|s| forward_lines(step, "stderr", s));

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for '{program}'"))?;

    // Drain remaining output before reporting.
    for handle in [stdout, stderr].into_iter().flatten() {
        let _ = handle.await;
    }

    let code = status.code().unwrap_or(-1);
    info!(step, exit_code = code, success = status.success(), "process exited");

    Ok(code)
}

fn forward_lines<R>(step: &'static str, stream: &'static str, reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    info!(step, stream, "{}", line.trim_end_matches(['\r', '\n']));
                }
                Err(e) => {
                    // Keep the pipe open until the child closes it.
                    warn!(step, stream, error = %e, "failed to read child output; discarding the rest");
                    let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                    break;
                }
            }
        }
    })
}

/// Human-readable command line, used for logs and `--dry-run`.
///
/// Arguments containing whitespace or `;` are double-quoted the way a
/// Windows shell would need them.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut out = program.to_string();
    for arg in args {
        out.push(' ');
        if arg.is_empty() || arg.contains([' ', '\t', ';']) {
            out.push('"');
            out.push_str(arg);
            out.push('"');
        } else {
            out.push_str(arg);
        }
    }
    out
}
