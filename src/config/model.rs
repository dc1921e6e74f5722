// src/config/model.rs

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

/// What a command generator produces for one matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedCommands {
    One(String),
    Many(Vec<String>),
}

impl GeneratedCommands {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            GeneratedCommands::One(cmd) => vec![cmd],
            GeneratedCommands::Many(cmds) => cmds,
        }
    }
}

impl From<String> for GeneratedCommands {
    fn from(cmd: String) -> Self {
        GeneratedCommands::One(cmd)
    }
}

impl From<&str> for GeneratedCommands {
    fn from(cmd: &str) -> Self {
        GeneratedCommands::One(cmd.to_string())
    }
}

impl From<Vec<String>> for GeneratedCommands {
    fn from(cmds: Vec<String>) -> Self {
        GeneratedCommands::Many(cmds)
    }
}

/// Function from the matched file path to the command(s) to run for it.
pub type CommandGenerator = Arc<dyn Fn(&str) -> GeneratedCommands + Send + Sync>;

/// Commands attached to a single glob pattern.
#[derive(Clone)]
pub enum CommandSpec {
    /// One command; the file path is interpolated at execution time.
    Literal(String),
    /// Several commands, run in order.
    List(Vec<String>),
    /// Commands computed per matched file. The generator embeds the file
    /// itself, so the executor runs its output verbatim.
    Generator(CommandGenerator),
}

impl CommandSpec {
    /// Wrap a closure as a [`CommandSpec::Generator`].
    pub fn generator<F, R>(f: F) -> Self
    where
        F: Fn(&str) -> R + Send + Sync + 'static,
        R: Into<GeneratedCommands>,
    {
        CommandSpec::Generator(Arc::new(move |file| f(file).into()))
    }

    /// Resolve into concrete command strings for `file`.
    ///
    /// The flag is true when the commands came from a generator.
    pub fn resolve(&self, file: &str) -> (Vec<String>, bool) {
        match self {
            CommandSpec::Literal(cmd) => (vec![cmd.clone()], false),
            CommandSpec::List(cmds) => (cmds.clone(), false),
            CommandSpec::Generator(generate) => (generate(file).into_vec(), true),
        }
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Literal(cmd) => f.debug_tuple("Literal").field(cmd).finish(),
            CommandSpec::List(cmds) => f.debug_tuple("List").field(cmds).finish(),
            CommandSpec::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<&str> for CommandSpec {
    fn from(cmd: &str) -> Self {
        CommandSpec::Literal(cmd.to_string())
    }
}

impl From<String> for CommandSpec {
    fn from(cmd: String) -> Self {
        CommandSpec::Literal(cmd)
    }
}

impl From<Vec<String>> for CommandSpec {
    fn from(cmds: Vec<String>) -> Self {
        CommandSpec::List(cmds)
    }
}

impl From<Vec<&str>> for CommandSpec {
    fn from(cmds: Vec<&str>) -> Self {
        CommandSpec::List(cmds.into_iter().map(str::to_string).collect())
    }
}

/// Ordered glob pattern -> command mapping.
///
/// Iteration follows insertion order, which for loaded documents is the
/// order the patterns appear in the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigMapping {
    entries: IndexMap<String, CommandSpec>,
}

impl ConfigMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the commands for `pattern`.
    ///
    /// Replacing keeps the pattern's original position.
    pub fn insert(&mut self, pattern: impl Into<String>, spec: impl Into<CommandSpec>) {
        self.entries.insert(pattern.into(), spec.into());
    }

    pub fn get(&self, pattern: &str) -> Option<&CommandSpec> {
        self.entries.get(pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSpec)> {
        self.entries.iter().map(|(p, s)| (p.as_str(), s))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Config document as read from TOML or from a `package.json` key.
///
/// This only performs deserialization; shapes are checked when converting
/// into a [`ConfigMapping`].
///
/// ```toml
/// "**/*.{ts,tsx}" = "prettier --write"
/// "src/**/*.ts" = ["eslint --fix", "tsc --noEmit"]
/// "**/*.json" = { each = "jsonlint {file}" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawConfigFile {
    pub entries: IndexMap<String, RawCommandSpec>,
}

/// Raw value attached to a pattern.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCommandSpec {
    Literal(String),
    List(Vec<String>),
    /// `{ each = "..." }` or `{ each = ["...", "..."] }`: per-file templates.
    PerFile(PerFileSpec),
    /// Anything else; rejected during validation.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerFileSpec {
    pub each: Templates,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Templates {
    One(String),
    Many(Vec<String>),
}

impl Templates {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Templates::One(t) => std::slice::from_ref(t),
            Templates::Many(ts) => ts,
        }
    }
}
