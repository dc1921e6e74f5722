#![allow(dead_code)]

use edithook::config::{CommandSpec, ConfigMapping, GeneratedCommands};
use edithook::matcher::Task;
use edithook::options::RunOptions;

/// Builder for `ConfigMapping` to simplify test setup.
pub struct ConfigMappingBuilder {
    mapping: ConfigMapping,
}

impl ConfigMappingBuilder {
    pub fn new() -> Self {
        Self {
            mapping: ConfigMapping::new(),
        }
    }

    pub fn command(mut self, pattern: &str, cmd: &str) -> Self {
        self.mapping.insert(pattern, cmd);
        self
    }

    pub fn commands(mut self, pattern: &str, cmds: &[&str]) -> Self {
        self.mapping.insert(pattern, cmds.to_vec());
        self
    }

    pub fn generator<F, R>(mut self, pattern: &str, f: F) -> Self
    where
        F: Fn(&str) -> R + Send + Sync + 'static,
        R: Into<GeneratedCommands>,
    {
        self.mapping.insert(pattern, CommandSpec::generator(f));
        self
    }

    pub fn build(self) -> ConfigMapping {
        self.mapping
    }
}

impl Default for ConfigMappingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RunOptions`, starting from the defaults (concurrent, no
/// fail-fast, no dry-run).
pub struct RunOptionsBuilder {
    options: RunOptions,
}

impl RunOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: RunOptions::default(),
        }
    }

    pub fn sequential(mut self) -> Self {
        self.options.concurrent = false;
        self
    }

    pub fn concurrent(mut self) -> Self {
        self.options.concurrent = true;
        self
    }

    pub fn fail_fast(mut self, val: bool) -> Self {
        self.options.fail_fast = val;
        self
    }

    pub fn dry_run(mut self, val: bool) -> Self {
        self.options.dry_run = val;
        self
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.options.verbose = val;
        self
    }

    pub fn max_buffer(mut self, bytes: usize) -> Self {
        self.options.max_buffer = bytes;
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> RunOptions {
        self.options
    }
}

impl Default for RunOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A plain (non-generated) task.
pub fn task(pattern: &str, command: &str, file: &str) -> Task {
    Task {
        pattern: pattern.to_string(),
        command: command.to_string(),
        file: file.to_string(),
        is_function_generated: false,
    }
}
