// src/config/mod.rs

//! Configuration loading and validation for edithook.
//!
//! Responsibilities:
//! - Define the pattern -> command mapping (`model.rs`).
//! - Discover and load a config from disk (`loader.rs`).
//! - Turn raw documents into a checked [`ConfigMapping`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{LoaderOptions, load_and_validate, load_config, load_from_path};
pub use model::{
    CommandGenerator, CommandSpec, ConfigMapping, GeneratedCommands, RawCommandSpec,
    RawConfigFile,
};
