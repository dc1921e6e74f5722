// src/hook/output.rs

use std::fmt::Display;

use serde::Serialize;

use crate::errors::Result;
use crate::types::ProcessingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Block,
}

/// Report printed on stderr when the edit should be blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookErrorOutput {
    pub decision: Decision,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HookErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookErrorDetails {
    pub command: String,
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl HookErrorOutput {
    /// Report for failed commands. Details are only attached when there is
    /// exactly one failure.
    pub fn from_errors(errors: &[ProcessingError]) -> Self {
        let commands: Vec<&str> = errors.iter().map(|e| e.command.as_str()).collect();

        let details = match errors {
            [only] => Some(HookErrorDetails {
                command: only.command.clone(),
                stderr: only.stderr.clone(),
                stdout: only.stdout.clone(),
                exit_code: only.exit_code,
            }),
            _ => None,
        };

        Self {
            decision: Decision::Block,
            reason: format!("Command failed: {}", commands.join(", ")),
            details,
        }
    }

    /// Report for a run that could not complete (bad config, fail-fast abort).
    pub fn from_failure(err: &dyn Display) -> Self {
        Self {
            decision: Decision::Block,
            reason: format!("Processing failed: {err}"),
            details: None,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
