// src/hook/mod.rs

//! Post-tool-use hook front end.
//!
//! Decides whether an editor event is relevant, loads the config for the
//! event's working directory, runs the matching commands and turns the
//! outcome into an exit status plus an optional block report.

pub mod input;
pub mod output;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::loader::load_from_path;
use crate::config::{ConfigMapping, LoaderOptions, load_config};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::options::RunOptions;
use crate::processor::FileProcessor;

pub use input::PostToolUseInput;
pub use output::{Decision, HookErrorDetails, HookErrorOutput};

/// Exit status telling the editor to block on the reported errors.
pub const BLOCK_EXIT_CODE: i32 = 2;

/// Where the hook gets its mapping from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Look in the event's working directory (and maybe its parents).
    Discover(LoaderOptions),
    /// An explicit TOML file.
    File(PathBuf),
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::Discover(LoaderOptions::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Not a successful file edit by a supported tool.
    Ignored,
    /// No config, or an empty one.
    Unconfigured,
    /// Every matching command succeeded (or nothing matched).
    Completed,
    /// Something failed; the report goes to stderr.
    Blocked(HookErrorOutput),
}

impl HookOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            HookOutcome::Blocked(_) => BLOCK_EXIT_CODE,
            _ => 0,
        }
    }
}

/// Handle one hook event end to end with the real shell executor.
pub async fn handle_post_tool_use(
    input: &PostToolUseInput,
    source: &ConfigSource,
    options: RunOptions,
    fs: &dyn FileSystem,
) -> HookOutcome {
    let Some(file) = input.edited_file() else {
        debug!(tool = %input.tool_name, "ignoring event");
        return HookOutcome::Ignored;
    };

    let working_dir = event_working_dir(input);

    let mapping = match load_mapping(fs, source, &working_dir) {
        Ok(Some(mapping)) if !mapping.is_empty() => mapping,
        Ok(_) => {
            debug!(cwd = %working_dir.display(), "no configuration found");
            return HookOutcome::Unconfigured;
        }
        Err(err) => return HookOutcome::Blocked(HookErrorOutput::from_failure(&err)),
    };

    let processor = FileProcessor::new(mapping, options);
    process_edit(&processor, file, &working_dir).await
}

/// Run the processor for one edited file and map the result to an outcome.
pub async fn process_edit(processor: &FileProcessor, file: &str, working_dir: &Path) -> HookOutcome {
    println!("Processing file: {file}");

    match processor.process_file(file, working_dir).await {
        Ok(errors) if errors.is_empty() => {
            println!("Processing completed");
            HookOutcome::Completed
        }
        Ok(errors) => HookOutcome::Blocked(HookErrorOutput::from_errors(&errors)),
        Err(err) => HookOutcome::Blocked(HookErrorOutput::from_failure(&err)),
    }
}

fn load_mapping(
    fs: &dyn FileSystem,
    source: &ConfigSource,
    working_dir: &Path,
) -> Result<Option<ConfigMapping>> {
    match source {
        ConfigSource::Discover(options) => load_config(fs, working_dir, *options),
        ConfigSource::File(path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                working_dir.join(path)
            };
            let raw = load_from_path(fs, &path)?;
            ConfigMapping::try_from(raw).map(Some)
        }
    }
}

fn event_working_dir(input: &PostToolUseInput) -> PathBuf {
    if input.cwd.is_empty() {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        PathBuf::from(&input.cwd)
    }
}
