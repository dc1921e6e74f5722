// src/matcher/path_utils.rs

//! Utility functions for turning edited paths into match keys.

use std::path::{Component, Path, PathBuf};

/// The string a file is matched against.
///
/// Absolute paths are made relative to `working_dir` when one is given;
/// anything else is used as given. Separators become `/` and a leading `./`
/// is dropped.
pub fn match_key(file: &str, working_dir: Option<&Path>) -> String {
    let path = Path::new(file);
    let key = match working_dir {
        Some(root) if path.is_absolute() => relative_str(root, path),
        _ => file.replace('\\', "/"),
    };

    match key.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => key,
    }
}

/// Convert `path` into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
/// - Otherwise the relative path is computed lexically, climbing out of
///   `root` with `..` as needed.
pub fn relative_str(root: &Path, path: &Path) -> String {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    if let Ok(rel) = path.strip_prefix(&root) {
        return to_slash(rel);
    }

    // Helps on platforms (notably macOS) where different absolute prefixes
    // may be used for the same directory (e.g. /private/var/...).
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return to_slash(rel);
        }
    }

    to_slash(&lexical_relative(&root, path))
}

fn lexical_relative(root: &Path, path: &Path) -> PathBuf {
    let root: Vec<Component<'_>> = root.components().collect();
    let target: Vec<Component<'_>> = path.components().collect();

    let common = root
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..root.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
