// src/matcher/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Compile a single glob pattern.
///
/// Semantics follow the usual shell globs: `*` and `?` stay within one path
/// segment, `**` spans directories, `{a,b}` and `[...]` are supported.
/// Wildcards also match names starting with a dot.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(glob.compile_matcher())
}

/// A configured pattern together with its compiled matcher.
#[derive(Clone)]
pub struct PatternProfile {
    pattern: String,
    matcher: GlobMatcher,
}

impl fmt::Debug for PatternProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternProfile")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl PatternProfile {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: compile_pattern(pattern)?,
        })
    }

    /// Returns true if `rel_path` (project-relative, `/`-separated) matches.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.matcher.is_match(rel_path)
    }
}
