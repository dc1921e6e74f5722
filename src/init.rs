// src/init.rs

//! `edithook init`: write a starter config.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::loader::default_config_path;
use crate::errors::Result;
use crate::fs::FileSystem;

pub const CONFIG_TEMPLATE: &str = r#"# edithook configuration
#
# Keys are glob patterns matched against the edited file's path, relative to
# the project root. Values are one of:
#   - a command: the file path is appended, or substituted for {file}
#   - an array of commands, run in order
#   - { each = "..." }: a template expanded for every matched file

# Format TypeScript/JavaScript files with Prettier
"**/*.{ts,js,tsx,jsx}" = "prettier --write"

# Run ESLint and TypeScript checks on source files
"src/**/*.{ts,tsx}" = ["eslint --fix", "tsc --noEmit"]

# Format CSS files
"**/*.css" = "prettier --write"

# Lint and format HTML files
"**/*.html" = ["prettier --write", "htmlhint"]

# Validate JSON files individually
"**/*.json" = { each = "jsonlint {file}" }

# Run tests related to edited test files
"**/*.test.{ts,js}" = "npm test -- --findRelatedTests --passWithNoTests"

# Format markdown files
"**/*.md" = "prettier --write"
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    Cancelled(PathBuf),
}

/// Write [`CONFIG_TEMPLATE`] to `.claude/edithook.toml` under `dir`.
///
/// When the file already exists, `confirm_overwrite` decides whether to
/// replace it.
pub fn init_config<F>(fs: &dyn FileSystem, dir: &Path, confirm_overwrite: F) -> Result<InitOutcome>
where
    F: FnOnce(&Path) -> Result<bool>,
{
    let path = default_config_path(dir);
    let existed = fs.exists(&path);

    if existed && !confirm_overwrite(&path)? {
        return Ok(InitOutcome::Cancelled(path));
    }

    fs.write(&path, CONFIG_TEMPLATE.as_bytes())?;

    Ok(if existed {
        InitOutcome::Overwritten(path)
    } else {
        InitOutcome::Created(path)
    })
}

/// Ask on the terminal whether an existing config may be replaced.
pub fn prompt_overwrite<R, W>(path: &Path, mut input: R, mut output: W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Configuration file already exists: {}", path.display())?;
    write!(output, "Do you want to overwrite it? (y/N): ")?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("reading overwrite confirmation")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
