// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `edithook`.
///
/// Without a subcommand, `edithook` acts as a post-tool-use hook and reads
/// the event JSON from the first argument or from stdin.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "edithook",
    version,
    about = "Run commands on files matching glob patterns after they are edited.",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Hook event JSON. Read from stdin when omitted.
    #[arg(value_name = "JSON")]
    pub input: Option<String>,

    #[command(flatten)]
    pub run: RunFlags,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EDITHOOK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create `.claude/edithook.toml` from a template.
    Init {
        /// Overwrite an existing file without asking.
        #[arg(long)]
        force: bool,
    },
    /// Process the given files directly, without hook JSON.
    Run {
        /// Project root patterns are matched against.
        ///
        /// Default: the current working directory.
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        #[command(flatten)]
        flags: RunFlags,

        /// Files to process.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },
}

/// Flags shared by hook mode and `run`.
///
/// Unset flags fall back to the `EDITHOOK_*` environment variables.
#[derive(Debug, Clone, Default, Args)]
pub struct RunFlags {
    /// Path to a TOML config, skipping discovery.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also look for a config in parent directories.
    #[arg(long)]
    pub search_parent: bool,

    /// Log every command before running it. [env: EDITHOOK_VERBOSE]
    #[arg(long)]
    pub verbose: bool,

    /// Run commands one after another. [env: EDITHOOK_CONCURRENT=false]
    #[arg(long)]
    pub sequential: bool,

    /// Print commands instead of running them. [env: EDITHOOK_DRY_RUN]
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first failing command. [env: EDITHOOK_FAIL_ON_ERROR]
    #[arg(long)]
    pub fail_fast: bool,

    /// Kill commands running longer than this; 0 disables. [env: EDITHOOK_TIMEOUT_SECS]
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Maximum captured bytes per output stream.
    #[arg(long, value_name = "BYTES")]
    pub max_buffer: Option<usize>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// The run flags that apply to this invocation, if it runs commands.
    pub fn run_flags(&self) -> Option<&RunFlags> {
        match &self.command {
            None => Some(&self.run),
            Some(Command::Run { flags, .. }) => Some(flags),
            Some(Command::Init { .. }) => None,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
