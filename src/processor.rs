// src/processor.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ConfigMapping;
use crate::engine::Dispatcher;
use crate::errors::Result;
use crate::exec::{ExecutorBackend, ShellExecutor};
use crate::matcher::build_tasks_for_files;
use crate::options::RunOptions;
use crate::types::ProcessingError;

/// Matches edited files against a mapping and runs the resulting commands.
pub struct FileProcessor {
    mapping: ConfigMapping,
    dispatcher: Dispatcher,
    verbose: bool,
}

impl FileProcessor {
    /// Processor backed by the real shell executor.
    pub fn new(mapping: ConfigMapping, options: RunOptions) -> Self {
        let backend = Arc::new(ShellExecutor::new(options.exec_options()));
        Self::with_backend(mapping, options, backend)
    }

    /// Processor with a custom executor backend (used by tests).
    pub fn with_backend(
        mapping: ConfigMapping,
        options: RunOptions,
        backend: Arc<dyn ExecutorBackend>,
    ) -> Self {
        Self {
            mapping,
            dispatcher: Dispatcher::new(backend, options.dispatch_options()),
            verbose: options.verbose,
        }
    }

    /// Run every command configured for `file`.
    ///
    /// An empty result means either success or that nothing matched.
    pub async fn process_file(&self, file: &str, working_dir: &Path) -> Result<Vec<ProcessingError>> {
        self.process_files(&[file], working_dir).await
    }

    /// Run every command configured for any of `files`.
    pub async fn process_files<S: AsRef<str>>(
        &self,
        files: &[S],
        working_dir: &Path,
    ) -> Result<Vec<ProcessingError>> {
        let tasks = build_tasks_for_files(&self.mapping, files, Some(working_dir))?;

        if tasks.is_empty() {
            let names: Vec<&str> = files.iter().map(|f| f.as_ref()).collect();
            if self.verbose {
                info!(files = ?names, "no matching patterns");
            } else {
                debug!(files = ?names, "no matching patterns");
            }
            return Ok(Vec::new());
        }

        self.dispatcher.run(tasks, working_dir).await
    }
}
