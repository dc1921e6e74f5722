// src/exec/task_runner.rs

//! Individual shell process runner.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::exec::ExecOptions;
use crate::types::CommandResult;

/// Run `line` through the platform shell in `working_dir` and capture its
/// output.
///
/// Every failure mode (nonzero exit, spawn error, output overflow, timeout)
/// ends up in the returned result; nothing is propagated.
pub async fn run_shell(line: &str, working_dir: &Path, options: &ExecOptions) -> CommandResult {
    if line.trim().is_empty() {
        return CommandResult::failed("empty command", None, "", "");
    }

    match run_shell_inner(line, working_dir, options).await {
        Ok(result) => result,
        Err(err) => {
            error!(command = %line, error = %err, "command execution error");
            CommandResult::failed(format!("{err:#}"), None, "", "")
        }
    }
}

async fn run_shell_inner(
    line: &str,
    working_dir: &Path,
    options: &ExecOptions,
) -> Result<CommandResult> {
    let mut cmd = shell_command(line);
    cmd.current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning shell for command '{line}'"))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let limit = options.max_buffer;

    let collect = async {
        let (out, err) = tokio::join!(read_bounded(stdout, limit), read_bounded(stderr, limit));
        let out = out.context("reading stdout")?;
        let err = err.context("reading stderr")?;
        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for command '{line}'"))?;
        Ok::<_, anyhow::Error>((status, out, err))
    };

    let collected = match options.timeout {
        Some(timeout) => tokio::time::timeout(timeout, collect).await.ok(),
        None => Some(collect.await),
    };

    let (status, out, err) = match collected {
        Some(res) => res?,
        None => {
            let secs = options.timeout.map(|t| t.as_secs_f64()).unwrap_or_default();
            warn!(command = %line, timeout_secs = secs, "command timed out; killing process");
            if let Err(e) = child.kill().await {
                warn!(command = %line, error = %e, "failed to kill timed out process");
            }
            return Ok(CommandResult::failed(
                format!("command timed out after {secs}s: {line}"),
                None,
                "",
                "",
            ));
        }
    };

    let code = status.code();
    debug!(command = %line, exit_code = ?code, success = status.success(), "command exited");

    if out.overflowed || err.overflowed {
        let stream = if out.overflowed { "stdout" } else { "stderr" };
        return Ok(CommandResult::failed(
            format!("{stream} maxBuffer length exceeded ({limit} bytes): {line}"),
            code,
            out.text,
            err.text,
        ));
    }

    if status.success() {
        return Ok(CommandResult::succeeded(out.text, err.text));
    }

    let error = match code {
        Some(c) => format!("command failed with exit code {c}: {line}"),
        None => format!("command terminated by signal: {line}"),
    };
    Ok(CommandResult::failed(error, code, out.text, err.text))
}

/// Build a shell command appropriate for the platform.
fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(line);
        c
    }
}

#[derive(Debug, Default)]
struct Captured {
    text: String,
    overflowed: bool,
}

/// Read a stream to EOF keeping at most `limit` bytes.
///
/// Anything past the limit is drained and dropped so the child never blocks
/// on a full pipe.
async fn read_bounded<R>(reader: Option<R>, limit: usize) -> std::io::Result<Captured>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(Captured::default());
    };

    let mut buf = Vec::new();
    (&mut reader)
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .await?;

    let overflowed = buf.len() > limit;
    if overflowed {
        buf.truncate(limit);
        tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    }

    Ok(Captured {
        text: String::from_utf8_lossy(&buf).into_owned(),
        overflowed,
    })
}
