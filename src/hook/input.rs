// src/hook/input.rs

use serde::Deserialize;
use serde_json::Value;

use crate::errors::Result;

/// Tools whose successful runs mean a file was written.
pub const SUPPORTED_TOOLS: [&str; 3] = ["Write", "Edit", "MultiEdit"];

/// Payload of a post-tool-use hook event.
///
/// Every field is optional on the wire so that unrelated events still
/// parse and are simply ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostToolUseInput {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub transcript_path: String,
    #[serde(default)]
    pub cwd: String,
    #[serde(default)]
    pub hook_event_name: String,
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: Value,
    #[serde(default)]
    pub tool_response: Value,
}

impl PostToolUseInput {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The tool reported success: `success: true`, `type: "update"`, or a
    /// `filePath` in the response.
    pub fn tool_succeeded(&self) -> bool {
        let response = &self.tool_response;
        response.get("success").and_then(Value::as_bool) == Some(true)
            || response.get("type").and_then(Value::as_str) == Some("update")
            || response.get("filePath").is_some_and(|v| !v.is_null())
    }

    pub fn is_supported_tool(&self) -> bool {
        SUPPORTED_TOOLS.contains(&self.tool_name.as_str())
    }

    /// `tool_input.file_path`, if present and non-empty.
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input
            .get("file_path")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    /// The file to process, or `None` when this event should be ignored.
    pub fn edited_file(&self) -> Option<&str> {
        if !self.tool_succeeded() || !self.is_supported_tool() {
            return None;
        }
        self.file_path()
    }
}
