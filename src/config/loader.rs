// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigMapping, RawConfigFile};
use crate::errors::{EdithookError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Project-local config file, relative to the directory being searched.
pub const CONFIG_FILE_NAME: &str = ".claude/edithook.toml";

pub const PACKAGE_JSON: &str = "package.json";

/// Key inside `package.json` holding an inline mapping.
pub const PACKAGE_JSON_KEY: &str = "edithook";

#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderOptions {
    /// Keep looking in parent directories when nothing is found.
    pub search_parent: bool,
}

/// Load a TOML config file and return the raw document.
///
/// This only performs TOML deserialization; it does **not** check command
/// shapes or glob syntax. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a TOML config file from disk and validate it into a mapping.
///
/// Used for an explicit `--config PATH`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigMapping> {
    let raw = load_from_path(&RealFileSystem, path)?;
    ConfigMapping::try_from(raw)
}

/// Discover the config for `dir`.
///
/// Lookup order per directory:
/// 1. `.claude/edithook.toml`
/// 2. the `"edithook"` key of `package.json`
///
/// With `search_parent`, the same lookup is repeated for every ancestor
/// until something is found. Returns `Ok(None)` when nothing is configured.
pub fn load_config(
    fs: &dyn FileSystem,
    dir: &Path,
    options: LoaderOptions,
) -> Result<Option<ConfigMapping>> {
    let mut current = Some(dir);

    while let Some(search_dir) = current {
        let config_path = search_dir.join(CONFIG_FILE_NAME);
        if fs.is_file(&config_path) {
            debug!(path = %config_path.display(), "loading config file");
            let raw = load_from_path(fs, &config_path)?;
            return ConfigMapping::try_from(raw).map(Some);
        }

        let package_json = search_dir.join(PACKAGE_JSON);
        if let Some(raw) = load_package_json(fs, &package_json)? {
            debug!(path = %package_json.display(), "loading config from package.json");
            return ConfigMapping::try_from(raw).map(Some);
        }

        if !options.search_parent {
            break;
        }
        current = search_dir.parent();
    }

    Ok(None)
}

/// Read the `"edithook"` key of a `package.json`.
///
/// A missing or unparseable `package.json` is not ours to complain about, so
/// it is skipped. A present key with the wrong shape is an error.
fn load_package_json(fs: &dyn FileSystem, path: &Path) -> Result<Option<RawConfigFile>> {
    if !fs.is_file(path) {
        return Ok(None);
    }

    let contents = match fs.read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable package.json");
            return Ok(None);
        }
    };

    let mut package: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(v) => v,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping invalid package.json");
            return Ok(None);
        }
    };

    match package.get_mut(PACKAGE_JSON_KEY).map(serde_json::Value::take) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value @ serde_json::Value::Object(_)) => Ok(Some(serde_json::from_value(value)?)),
        Some(_) => Err(EdithookError::ConfigError(format!(
            "\"{PACKAGE_JSON_KEY}\" in {} must be an object mapping glob patterns to commands",
            path.display()
        ))),
    }
}

/// Where the default config lives for a project rooted at `dir`.
pub fn default_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}
