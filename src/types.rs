// src/types.rs

use crate::matcher::Task;

/// Outcome of running one command line.
///
/// Command failures are reported here, never as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// Human-readable failure description (exit status, spawn error, ...).
    pub error: Option<String>,
    /// Exit status, when the process ran to completion.
    pub exit_code: Option<i32>,
}

impl CommandResult {
    pub fn succeeded(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: stderr.into(),
            error: None,
            exit_code: Some(0),
        }
    }

    pub fn failed(
        error: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
            error: Some(error.into()),
            exit_code,
        }
    }

    /// Result reported in dry-run mode: success with no output.
    pub fn dry_run() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }
}

/// A failed task, as surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingError {
    pub command: String,
    pub pattern: String,
    pub stdout: Option<String>,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl ProcessingError {
    pub fn from_failure(task: Task, result: CommandResult) -> Self {
        Self {
            command: task.command,
            pattern: task.pattern,
            stdout: Some(result.stdout).filter(|s| !s.is_empty()),
            stderr: result.stderr,
            exit_code: result.exit_code,
        }
    }
}
