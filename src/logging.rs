// src/logging.rs

//! Logging setup for `edithook` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `EDITHOOK_LOG`, any `EnvFilter` directive (e.g. "debug",
//!    "edithook::exec=trace")
//! 3. `info` in verbose mode, `warn` otherwise
//!
//! Logs go to STDERR without timestamps. Verbose mode relies on the `info`
//! default to show every command line before it runs; otherwise a block
//! report is normally the only thing written there.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const ENV_LOG: &str = "EDITHOOK_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "info";

/// Install the global subscriber. Call once at startup.
///
/// `verbose` is the resolved verbose option (flag or `EDITHOOK_VERBOSE`).
pub fn init_logging(cli_level: Option<LogLevel>, verbose: bool) -> Result<()> {
    let env = std::env::var(ENV_LOG).ok();
    let filter = log_filter(cli_level, env.as_deref(), verbose);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

/// Resolve the filter from the CLI level, the raw `EDITHOOK_LOG` value and
/// the verbose option.
///
/// An unparseable `EDITHOOK_LOG` falls back to the default.
pub fn log_filter(cli_level: Option<LogLevel>, env: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    env.map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| {
            EnvFilter::new(if verbose {
                VERBOSE_DIRECTIVE
            } else {
                DEFAULT_DIRECTIVE
            })
        })
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
