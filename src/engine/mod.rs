// src/engine/mod.rs

//! Dispatch engine for edithook.
//!
//! Takes the task list built by [`crate::matcher`] and runs it through an
//! [`ExecutorBackend`](crate::exec::ExecutorBackend), either one task at a
//! time or all at once, collecting failures into
//! [`ProcessingError`](crate::types::ProcessingError)s.

pub mod dispatcher;

pub use dispatcher::{DispatchOptions, Dispatcher};
