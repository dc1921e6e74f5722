// src/options.rs

//! Run options resolved from CLI flags and `EDITHOOK_*` environment
//! variables.
//!
//! This is the only place the environment is consulted; the matcher,
//! executor and dispatcher receive explicit option values.

use std::time::Duration;

use crate::cli::RunFlags;
use crate::engine::DispatchOptions;
use crate::exec::{DEFAULT_MAX_BUFFER, ExecOptions};

pub const ENV_VERBOSE: &str = "EDITHOOK_VERBOSE";
pub const ENV_CONCURRENT: &str = "EDITHOOK_CONCURRENT";
pub const ENV_DRY_RUN: &str = "EDITHOOK_DRY_RUN";
pub const ENV_FAIL_ON_ERROR: &str = "EDITHOOK_FAIL_ON_ERROR";
pub const ENV_TIMEOUT_SECS: &str = "EDITHOOK_TIMEOUT_SECS";

/// Everything one processing call needs to know about how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub verbose: bool,
    pub concurrent: bool,
    pub dry_run: bool,
    pub fail_fast: bool,
    pub max_buffer: usize,
    pub timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            concurrent: true,
            dry_run: false,
            fail_fast: false,
            max_buffer: DEFAULT_MAX_BUFFER,
            timeout: None,
        }
    }
}

impl RunOptions {
    /// Options from the process environment alone.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Options from an arbitrary variable lookup.
    ///
    /// - `EDITHOOK_VERBOSE`, `EDITHOOK_DRY_RUN`, `EDITHOOK_FAIL_ON_ERROR`
    ///   are enabled by `true`.
    /// - `EDITHOOK_CONCURRENT` is on unless set to `false`.
    /// - `EDITHOOK_TIMEOUT_SECS` is a whole number of seconds; `0` or junk
    ///   means no timeout.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_true = |key: &str| lookup(key).is_some_and(|v| v.trim() == "true");

        Self {
            verbose: is_true(ENV_VERBOSE),
            concurrent: lookup(ENV_CONCURRENT).is_none_or(|v| v.trim() != "false"),
            dry_run: is_true(ENV_DRY_RUN),
            fail_fast: is_true(ENV_FAIL_ON_ERROR),
            max_buffer: DEFAULT_MAX_BUFFER,
            timeout: lookup(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Apply CLI flags on top; a set flag always wins.
    pub fn with_flags(mut self, flags: &RunFlags) -> Self {
        self.verbose |= flags.verbose;
        self.dry_run |= flags.dry_run;
        self.fail_fast |= flags.fail_fast;
        if flags.sequential {
            self.concurrent = false;
        }
        if let Some(bytes) = flags.max_buffer {
            self.max_buffer = bytes;
        }
        if let Some(secs) = flags.timeout_secs {
            self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        self
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            verbose: self.verbose,
            dry_run: self.dry_run,
            max_buffer: self.max_buffer,
            timeout: self.timeout,
        }
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            concurrent: self.concurrent,
            fail_fast: self.fail_fast,
            verbose: self.verbose,
        }
    }
}
