// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The dispatcher talks to an `ExecutorBackend` instead of spawning
//! processes itself. This makes it easy to swap in a fake executor in tests
//! while keeping the production implementation in [`task_runner`].
//!
//! - `ShellExecutor` is the default implementation used by `edithook`. It
//!   interpolates the file into the command and runs it through the shell.
//! - Tests can provide their own `ExecutorBackend` that, for example, records
//!   which commands were run and returns canned results.
//!
//! [`task_runner`]: super::task_runner

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tracing::{debug, info};

use crate::exec::ExecOptions;
use crate::exec::command::command_line;
use crate::exec::task_runner::run_shell;
use crate::matcher::Task;
use crate::types::CommandResult;

/// Trait abstracting how a single task is executed.
///
/// Production code uses [`ShellExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send + Sync {
    /// Run one task in `working_dir`.
    ///
    /// Implementations report failure through the returned result.
    fn execute_task<'a>(
        &'a self,
        task: &'a Task,
        working_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>>;
}

/// Real executor backend used in production.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    options: ExecOptions,
}

impl ShellExecutor {
    pub fn new(options: ExecOptions) -> Self {
        Self { options }
    }

    /// Run `template` against `file` in `working_dir`.
    ///
    /// - Generated commands run verbatim; other templates get `file`
    ///   substituted for `{file}` or appended.
    /// - In dry-run mode nothing is spawned and the result is a success.
    pub async fn execute(
        &self,
        template: &str,
        file: &str,
        working_dir: &Path,
        is_function_generated: bool,
    ) -> CommandResult {
        let line = command_line(template, file, is_function_generated);

        if self.options.verbose {
            info!(command = %line, cwd = %working_dir.display(), "executing");
        } else {
            debug!(command = %line, cwd = %working_dir.display(), "executing");
        }

        if self.options.dry_run {
            println!("[dry run] would execute: {line}");
            return CommandResult::dry_run();
        }

        run_shell(&line, working_dir, &self.options).await
    }
}

impl ExecutorBackend for ShellExecutor {
    fn execute_task<'a>(
        &'a self,
        task: &'a Task,
        working_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>> {
        Box::pin(self.execute(
            &task.command,
            &task.file,
            working_dir,
            task.is_function_generated,
        ))
    }
}
