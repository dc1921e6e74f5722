// src/config/validate.rs

use serde_json::Value;

use crate::config::model::{CommandSpec, ConfigMapping, RawCommandSpec, RawConfigFile};
use crate::errors::{EdithookError, Result};
use crate::exec::command::interpolate;
use crate::matcher::patterns::compile_pattern;

impl TryFrom<RawConfigFile> for ConfigMapping {
    type Error = EdithookError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let mut mapping = ConfigMapping::new();
        for (pattern, raw_spec) in raw.entries {
            validate_pattern(&pattern)?;
            let spec = command_spec(&pattern, raw_spec)?;
            mapping.insert(pattern, spec);
        }
        Ok(mapping)
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    compile_pattern(pattern)
        .map(|_| ())
        .map_err(|e| EdithookError::ConfigError(format!("{e:#}")))
}

fn command_spec(pattern: &str, raw: RawCommandSpec) -> Result<CommandSpec> {
    match raw {
        RawCommandSpec::Literal(cmd) => {
            ensure_command(pattern, &cmd)?;
            Ok(CommandSpec::Literal(cmd))
        }
        RawCommandSpec::List(cmds) => {
            for cmd in &cmds {
                ensure_command(pattern, cmd)?;
            }
            Ok(CommandSpec::List(cmds))
        }
        RawCommandSpec::PerFile(per_file) => {
            let templates = per_file.each.as_slice().to_vec();
            if templates.is_empty() {
                return Err(EdithookError::ConfigError(format!(
                    "pattern '{pattern}': `each` must contain at least one template"
                )));
            }
            for template in &templates {
                ensure_command(pattern, template)?;
            }
            Ok(CommandSpec::generator(move |file: &str| {
                templates
                    .iter()
                    .map(|t| interpolate(t, file))
                    .collect::<Vec<_>>()
            }))
        }
        RawCommandSpec::Other(value) => Err(EdithookError::ConfigError(format!(
            "invalid command configuration for pattern '{pattern}': expected a string, \
             an array of strings or an `each` table, got {}",
            describe_value(&value)
        ))),
    }
}

fn ensure_command(pattern: &str, cmd: &str) -> Result<()> {
    if cmd.trim().is_empty() {
        return Err(EdithookError::ConfigError(format!(
            "pattern '{pattern}' has an empty command"
        )));
    }
    Ok(())
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) if n.is_f64() => "float".to_string(),
        Value::Number(_) => "integer".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => match items.iter().find(|v| !v.is_string()) {
            Some(item) => format!("array containing {}", describe_value(item)),
            None => "array".to_string(),
        },
        Value::Object(map) if map.contains_key("each") => {
            "table with an invalid `each` entry".to_string()
        }
        Value::Object(_) => "table".to_string(),
    }
}
