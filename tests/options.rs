// tests/options.rs

use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use edithook::cli::{CliArgs, Command, RunFlags};
use edithook::exec::DEFAULT_MAX_BUFFER;
use edithook::options::{
    ENV_CONCURRENT, ENV_DRY_RUN, ENV_FAIL_ON_ERROR, ENV_TIMEOUT_SECS, ENV_VERBOSE, RunOptions,
};

fn from_vars(vars: &[(&str, &str)]) -> RunOptions {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RunOptions::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn empty_environment_gives_defaults() {
    let options = from_vars(&[]);

    assert_eq!(options, RunOptions::default());
    assert!(options.concurrent);
    assert!(!options.fail_fast);
    assert!(!options.dry_run);
    assert!(!options.verbose);
    assert_eq!(options.max_buffer, DEFAULT_MAX_BUFFER);
    assert_eq!(options.timeout, None);
}

#[test]
fn environment_switches_are_read() {
    let options = from_vars(&[
        (ENV_VERBOSE, "true"),
        (ENV_CONCURRENT, "false"),
        (ENV_DRY_RUN, "true"),
        (ENV_FAIL_ON_ERROR, "true"),
        (ENV_TIMEOUT_SECS, "30"),
    ]);

    assert!(options.verbose);
    assert!(!options.concurrent);
    assert!(options.dry_run);
    assert!(options.fail_fast);
    assert_eq!(options.timeout, Some(Duration::from_secs(30)));
}

#[test]
fn only_the_exact_switch_values_count() {
    let options = from_vars(&[
        (ENV_VERBOSE, "1"),
        (ENV_CONCURRENT, "no"),
        (ENV_FAIL_ON_ERROR, "yes"),
        (ENV_TIMEOUT_SECS, "soon"),
    ]);

    assert!(!options.verbose);
    assert!(options.concurrent);
    assert!(!options.fail_fast);
    assert_eq!(options.timeout, None);

    assert_eq!(from_vars(&[(ENV_TIMEOUT_SECS, "0")]).timeout, None);
}

#[test]
fn flags_override_the_environment() {
    let flags = RunFlags {
        sequential: true,
        fail_fast: true,
        timeout_secs: Some(0),
        max_buffer: Some(1024),
        ..RunFlags::default()
    };

    let options = from_vars(&[(ENV_TIMEOUT_SECS, "30")]).with_flags(&flags);

    assert!(!options.concurrent);
    assert!(options.fail_fast);
    assert_eq!(options.timeout, None);
    assert_eq!(options.max_buffer, 1024);

    let exec = options.exec_options();
    assert_eq!(exec.max_buffer, 1024);
    assert!(!exec.dry_run);

    let dispatch = options.dispatch_options();
    assert!(!dispatch.concurrent);
    assert!(dispatch.fail_fast);
}

#[test]
fn unset_flags_leave_the_environment_alone() {
    let options = from_vars(&[(ENV_DRY_RUN, "true"), (ENV_CONCURRENT, "false")])
        .with_flags(&RunFlags::default());

    assert!(options.dry_run);
    assert!(!options.concurrent);
}

#[test]
fn cli_parses_hook_mode_with_flags() {
    let args = CliArgs::parse_from(["edithook", "--dry-run", "--sequential", "{}"]);

    assert!(args.command.is_none());
    assert_eq!(args.input.as_deref(), Some("{}"));
    assert!(args.run.dry_run);
    assert!(args.run.sequential);
}

#[test]
fn cli_parses_run_subcommand() {
    let args = CliArgs::parse_from([
        "edithook",
        "run",
        "--cwd",
        "/project",
        "--fail-fast",
        "--timeout-secs",
        "10",
        "src/a.ts",
        "README.md",
    ]);

    match args.command {
        Some(Command::Run { cwd, flags, files }) => {
            assert_eq!(cwd.as_deref(), Some(std::path::Path::new("/project")));
            assert!(flags.fail_fast);
            assert_eq!(flags.timeout_secs, Some(10));
            assert_eq!(files, vec!["src/a.ts", "README.md"]);
        }
        other => panic!("Expected run subcommand, got: {:?}", other),
    }
}

#[test]
fn cli_parses_init_subcommand() {
    let args = CliArgs::parse_from(["edithook", "init", "--force"]);
    assert!(matches!(args.command, Some(Command::Init { force: true })));
}

#[test]
fn log_filter_prefers_cli_then_env_then_default() {
    use edithook::cli::LogLevel;
    use edithook::logging::log_filter;
    use tracing_subscriber::filter::LevelFilter;

    let hint = |cli, env, verbose| log_filter(cli, env, verbose).max_level_hint();

    assert_eq!(hint(Some(LogLevel::Trace), Some("error"), false), Some(LevelFilter::TRACE));
    assert_eq!(hint(None, Some("debug"), false), Some(LevelFilter::DEBUG));
    assert_eq!(hint(None, Some("edithook=loud"), false), Some(LevelFilter::WARN));
    assert_eq!(hint(None, None, false), Some(LevelFilter::WARN));

    // Verbose mode raises only the default; explicit choices still win.
    assert_eq!(hint(None, None, true), Some(LevelFilter::INFO));
    assert_eq!(hint(None, Some("error"), true), Some(LevelFilter::ERROR));
    assert_eq!(hint(Some(LogLevel::Warn), None, true), Some(LevelFilter::WARN));
}

#[test]
fn run_flags_follow_the_invocation() {
    let hook = CliArgs::parse_from(["edithook", "--verbose"]);
    assert!(hook.run_flags().is_some_and(|f| f.verbose));

    let run = CliArgs::parse_from(["edithook", "run", "--verbose", "a.ts"]);
    assert!(run.run_flags().is_some_and(|f| f.verbose));

    let init = CliArgs::parse_from(["edithook", "init"]);
    assert!(init.run_flags().is_none());
}
