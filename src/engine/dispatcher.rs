// src/engine/dispatcher.rs

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use crate::errors::{EdithookError, Result};
use crate::exec::ExecutorBackend;
use crate::matcher::Task;
use crate::types::{CommandResult, ProcessingError};

/// How a task list is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Launch every task before awaiting any of them.
    pub concurrent: bool,
    /// Abort the run with an error on the first failure.
    pub fail_fast: bool,
    /// Log per-task progress at info level.
    pub verbose: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            concurrent: true,
            fail_fast: false,
            verbose: false,
        }
    }
}

/// Runs tasks and turns failed results into [`ProcessingError`]s.
pub struct Dispatcher {
    backend: Arc<dyn ExecutorBackend>,
    options: DispatchOptions,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ExecutorBackend>, options: DispatchOptions) -> Self {
        Self { backend, options }
    }

    /// Run `tasks` in `working_dir`.
    ///
    /// Failures are reported in task order whatever the mode. With
    /// `fail_fast`, the first failure becomes
    /// [`EdithookError::CommandFailed`] instead.
    pub async fn run(&self, tasks: Vec<Task>, working_dir: &Path) -> Result<Vec<ProcessingError>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            tasks = tasks.len(),
            concurrent = self.options.concurrent,
            fail_fast = self.options.fail_fast,
            "dispatching tasks"
        );

        if self.options.concurrent {
            self.run_concurrent(tasks, working_dir).await
        } else {
            self.run_sequential(tasks, working_dir).await
        }
    }

    async fn run_sequential(
        &self,
        tasks: Vec<Task>,
        working_dir: &Path,
    ) -> Result<Vec<ProcessingError>> {
        let mut errors = Vec::new();

        for task in tasks {
            self.log_start(&task);
            let result = self.backend.execute_task(&task, working_dir).await;
            self.record(task, result, &mut errors)?;
        }

        Ok(errors)
    }

    async fn run_concurrent(
        &self,
        tasks: Vec<Task>,
        working_dir: &Path,
    ) -> Result<Vec<ProcessingError>> {
        // Fan out: every task gets its own tokio task before anything is awaited.
        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                self.log_start(&task);
                let backend = Arc::clone(&self.backend);
                let working_dir = working_dir.to_path_buf();
                tokio::spawn(async move {
                    let result = backend.execute_task(&task, &working_dir).await;
                    (task, result)
                })
            })
            .collect();

        // Fan in, in launch order.
        let mut completed = Vec::with_capacity(handles.len());
        for handle in handles {
            let pair = handle.await.context("joining command task")?;
            completed.push(pair);
        }

        let mut errors = Vec::new();
        for (task, result) in completed {
            self.record(task, result, &mut errors)?;
        }

        Ok(errors)
    }

    fn log_start(&self, task: &Task) {
        if self.options.verbose {
            info!(pattern = %task.pattern, command = %task.command, "running command");
        } else {
            debug!(pattern = %task.pattern, command = %task.command, "running command");
        }
    }

    fn record(
        &self,
        task: Task,
        result: CommandResult,
        errors: &mut Vec<ProcessingError>,
    ) -> Result<()> {
        if result.success {
            if self.options.verbose {
                info!(pattern = %task.pattern, command = %task.command, "command succeeded");
            }
            return Ok(());
        }

        info!(
            pattern = %task.pattern,
            command = %task.command,
            exit_code = ?result.exit_code,
            error = result.error.as_deref().unwrap_or(""),
            stderr = %result.stderr.trim_end(),
            "command failed"
        );

        let failure = ProcessingError::from_failure(task, result);

        if self.options.fail_fast {
            return Err(EdithookError::CommandFailed {
                command: failure.command,
                pattern: failure.pattern,
                exit_code: failure.exit_code,
            });
        }

        errors.push(failure);
        Ok(())
    }
}
