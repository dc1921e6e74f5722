// src/matcher/mod.rs

//! Matching edited files against the configured glob patterns.
//!
//! - [`patterns`] compiles a pattern with shell-glob semantics.
//! - [`path_utils`] turns the edited path into a project-relative string.
//! - [`tasks`] builds the `(pattern, command, file)` tasks for a run.

pub mod path_utils;
pub mod patterns;
pub mod tasks;

pub use patterns::{PatternProfile, compile_pattern};
pub use tasks::{Task, build_tasks, build_tasks_for_files};
