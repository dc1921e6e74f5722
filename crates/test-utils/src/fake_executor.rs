use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use edithook::exec::ExecutorBackend;
use edithook::matcher::Task;
use edithook::types::CommandResult;

/// A fake executor that:
/// - records which commands were started and in which order they finished
/// - fails the commands it was told to fail (exit code 1)
/// - optionally sleeps per command, to force a completion order.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    started: Arc<Mutex<Vec<String>>>,
    finished: Arc<Mutex<Vec<String>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` fail with exit code 1.
    pub fn failing(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    /// Make `command` take `delay` before completing.
    pub fn delayed(mut self, command: &str, delay: Duration) -> Self {
        self.delays.insert(command.to_string(), delay);
        self
    }

    /// Commands in the order they were started.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    /// Commands in the order they finished.
    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute_task<'a>(
        &'a self,
        task: &'a Task,
        _working_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut guard = self.started.lock().unwrap();
                guard.push(task.command.clone());
            }

            if let Some(delay) = self.delays.get(&task.command) {
                tokio::time::sleep(*delay).await;
            }

            {
                let mut guard = self.finished.lock().unwrap();
                guard.push(task.command.clone());
            }

            if self.failing.contains(&task.command) {
                CommandResult::failed(
                    format!("command failed with exit code 1: {}", task.command),
                    Some(1),
                    "",
                    format!("{} failed", task.command),
                )
            } else {
                CommandResult::succeeded(format!("ran {}", task.command), "")
            }
        })
    }
}
