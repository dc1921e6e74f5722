// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the configured commands
//! through the platform shell, using `tokio::process::Command`, and turning
//! whatever happens into a [`CommandResult`](crate::types::CommandResult).
//!
//! - [`command`] builds the literal command line (placeholder interpolation,
//!   path quoting).
//! - [`task_runner`] spawns the shell and captures bounded output.
//! - [`backend`] provides the `ExecutorBackend` trait and the concrete
//!   `ShellExecutor` the dispatcher uses in production, and which tests can
//!   replace with a fake implementation.

use std::time::Duration;

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{ExecutorBackend, ShellExecutor};

/// Per-stream capture limit for stdout/stderr (10 MiB).
pub const DEFAULT_MAX_BUFFER: usize = 10 * 1024 * 1024;

/// Options for the shell executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// Log every interpolated command line at info level.
    pub verbose: bool,
    /// Only report what would run.
    pub dry_run: bool,
    /// Maximum bytes captured per output stream; more is a failure.
    pub max_buffer: usize,
    /// Kill commands that run longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            max_buffer: DEFAULT_MAX_BUFFER,
            timeout: None,
        }
    }
}
