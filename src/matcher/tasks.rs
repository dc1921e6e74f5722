// src/matcher/tasks.rs

use std::path::Path;

use tracing::{debug, trace};

use crate::config::ConfigMapping;
use crate::errors::{EdithookError, Result};
use crate::matcher::path_utils::match_key;
use crate::matcher::patterns::PatternProfile;

/// One command to run for one matched file.
///
/// Built fresh for every invocation and consumed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// The configured glob pattern that matched.
    pub pattern: String,
    /// Command template (or, for generated commands, the literal command).
    pub command: String,
    /// The file as given by the caller.
    pub file: String,
    /// True when `command` came from a generator and already names the file.
    pub is_function_generated: bool,
}

/// Build the tasks for a single edited file.
///
/// Tasks follow mapping order, then command order within an entry. No match
/// yields an empty list.
pub fn build_tasks(
    mapping: &ConfigMapping,
    file: &str,
    working_dir: Option<&Path>,
) -> Result<Vec<Task>> {
    build_tasks_for_files(mapping, &[file], working_dir)
}

/// Build the tasks for several files at once.
///
/// For every mapping entry, every matching file (in the given order) gets
/// the entry's commands. Generators run once per matching file.
pub fn build_tasks_for_files<S: AsRef<str>>(
    mapping: &ConfigMapping,
    files: &[S],
    working_dir: Option<&Path>,
) -> Result<Vec<Task>> {
    let keys: Vec<String> = files
        .iter()
        .map(|f| match_key(f.as_ref(), working_dir))
        .collect();

    let mut tasks = Vec::new();

    for (pattern, spec) in mapping.iter() {
        let profile =
            PatternProfile::new(pattern).map_err(|e| EdithookError::ConfigError(format!("{e:#}")))?;

        for (file, key) in files.iter().zip(&keys) {
            let file = file.as_ref();
            if !profile.matches(key) {
                trace!(pattern, path = %key, "pattern did not match");
                continue;
            }

            let (commands, is_function_generated) = spec.resolve(file);
            debug!(
                pattern,
                file,
                commands = commands.len(),
                is_function_generated,
                "pattern matched"
            );

            tasks.extend(commands.into_iter().map(|command| Task {
                pattern: pattern.to_string(),
                command,
                file: file.to_string(),
                is_function_generated,
            }));
        }
    }

    Ok(tasks)
}
