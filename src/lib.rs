// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod hook;
pub mod init;
pub mod logging;
pub mod matcher;
pub mod options;
pub mod processor;
pub mod types;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::cli::{CliArgs, Command, RunFlags};
use crate::config::LoaderOptions;
use crate::fs::RealFileSystem;
use crate::hook::{ConfigSource, HookErrorOutput, HookOutcome, PostToolUseInput};
use crate::init::{InitOutcome, init_config, prompt_overwrite};
use crate::options::RunOptions;
use crate::processor::FileProcessor;

/// Exit status for unusable input (bad JSON, unknown arguments).
pub const INPUT_ERROR_EXIT_CODE: i32 = 1;

/// High-level entry point used by `main.rs`.
///
/// Returns the process exit status:
/// - `0` when everything succeeded or there was nothing to do,
/// - `1` for unusable input,
/// - `2` when commands failed (a JSON block report is on stderr).
pub async fn run(args: CliArgs) -> Result<i32> {
    match args.command {
        Some(Command::Init { force }) => run_init(force),
        Some(Command::Run { cwd, flags, files }) => run_files(cwd, &flags, &files).await,
        None => run_hook(args.input, &args.run).await,
    }
}

/// Where hook mode takes its JSON from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookInputSource {
    /// The positional argument.
    Argument(String),
    /// Piped stdin.
    Stdin,
    /// A positional argument that is not JSON.
    UnknownCommand(String),
    /// No argument and stdin is a terminal.
    Missing,
}

/// Pick the hook input source.
///
/// A JSON argument wins even when stdin is piped.
pub fn hook_input_source(arg: Option<String>, stdin_is_terminal: bool) -> HookInputSource {
    match arg {
        Some(arg) if !arg.trim_start().starts_with('{') => HookInputSource::UnknownCommand(arg),
        Some(arg) => HookInputSource::Argument(arg),
        None if stdin_is_terminal => HookInputSource::Missing,
        None => HookInputSource::Stdin,
    }
}

async fn run_hook(arg: Option<String>, flags: &RunFlags) -> Result<i32> {
    let raw = match hook_input_source(arg, std::io::stdin().is_terminal()) {
        HookInputSource::Argument(json) => json,
        HookInputSource::UnknownCommand(arg) => {
            eprintln!("Error: Unknown command '{arg}'");
            eprintln!("Available commands: init, run, --help");
            return Ok(INPUT_ERROR_EXIT_CODE);
        }
        HookInputSource::Missing => {
            eprintln!("Error: No input provided. Expected JSON input as argument or via stdin.");
            eprintln!("Use --help for usage information.");
            return Ok(INPUT_ERROR_EXIT_CODE);
        }
        HookInputSource::Stdin => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("reading hook input from stdin")?;
            buf
        }
    };

    let input = match PostToolUseInput::from_json(&raw) {
        Ok(input) => input,
        Err(err) => {
            debug!(error = %err, "invalid hook input");
            eprintln!("Error: Invalid JSON input");
            return Ok(INPUT_ERROR_EXIT_CODE);
        }
    };

    let options = RunOptions::from_env().with_flags(flags);
    let outcome =
        hook::handle_post_tool_use(&input, &config_source(flags), options, &RealFileSystem).await;

    report(&outcome)?;
    Ok(outcome.exit_code())
}

async fn run_files(cwd: Option<PathBuf>, flags: &RunFlags, files: &[String]) -> Result<i32> {
    let working_dir = match cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolving current directory")?,
    };

    let options = RunOptions::from_env().with_flags(flags);
    let outcome = process_run(flags, options, &working_dir, files).await;

    if outcome == HookOutcome::Unconfigured {
        eprintln!("No configuration found in {}", working_dir.display());
    }
    report(&outcome)?;
    Ok(outcome.exit_code())
}

/// Load the config for `working_dir` and process `files` with it.
///
/// Config errors are reported like command failures, as a block.
pub async fn process_run(
    flags: &RunFlags,
    options: RunOptions,
    working_dir: &Path,
    files: &[String],
) -> HookOutcome {
    let mapping = match load_for_run(flags, working_dir) {
        Ok(Some(mapping)) if !mapping.is_empty() => mapping,
        Ok(_) => return HookOutcome::Unconfigured,
        Err(err) => return HookOutcome::Blocked(HookErrorOutput::from_failure(&err)),
    };

    let processor = FileProcessor::new(mapping, options);

    match processor.process_files(files, working_dir).await {
        Ok(errors) if errors.is_empty() => HookOutcome::Completed,
        Ok(errors) => HookOutcome::Blocked(HookErrorOutput::from_errors(&errors)),
        Err(err) => HookOutcome::Blocked(HookErrorOutput::from_failure(&err)),
    }
}

fn run_init(force: bool) -> Result<i32> {
    let dir = std::env::current_dir().context("resolving current directory")?;

    let outcome = init_config(&RealFileSystem, &dir, |path| {
        if force {
            return Ok(true);
        }
        let stdin = std::io::stdin();
        prompt_overwrite(path, stdin.lock(), std::io::stdout())
    })?;

    match outcome {
        InitOutcome::Created(path) | InitOutcome::Overwritten(path) => {
            println!("Configuration file created: {}", path.display());
            println!();
            println!("Next steps:");
            println!("1. Customize the patterns and commands for your project");
            println!("2. Register `edithook` as a post-tool-use hook for Write|Edit|MultiEdit");
            println!("3. Run `edithook --help` for the available options");
        }
        InitOutcome::Cancelled(_) => println!("Configuration file creation cancelled."),
    }

    Ok(0)
}

fn config_source(flags: &RunFlags) -> ConfigSource {
    match &flags.config {
        Some(path) => ConfigSource::File(path.clone()),
        None => ConfigSource::Discover(LoaderOptions {
            search_parent: flags.search_parent,
        }),
    }
}

fn load_for_run(
    flags: &RunFlags,
    working_dir: &Path,
) -> crate::errors::Result<Option<config::ConfigMapping>> {
    match &flags.config {
        Some(path) => config::load_and_validate(working_dir.join(path)).map(Some),
        None => config::load_config(
            &RealFileSystem,
            working_dir,
            LoaderOptions {
                search_parent: flags.search_parent,
            },
        ),
    }
}

/// Print the block report, if any, as pretty JSON on stderr.
fn report(outcome: &HookOutcome) -> Result<()> {
    if let HookOutcome::Blocked(output) = outcome {
        eprintln!("{}", output.to_json_pretty()?);
    }
    Ok(())
}
