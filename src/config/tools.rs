//! Tool configuration loading.
//!
//! The tool configuration file is a JSON array of MCP server descriptors (a
//! single object is accepted as a one-element list). Loading never touches
//! the network; endpoint reachability is the remote call's problem.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::ConfigError;

/// When the remote transport must ask before executing a tool call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalPolicy {
    #[default]
    Never,
    Always,
    #[serde(alias = "prompt")]
    PerCall,
}

impl ApprovalPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalPolicy::Never => "never",
            ApprovalPolicy::Always => "always",
            ApprovalPolicy::PerCall => "per-call",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Mcp,
}

/// Descriptor for one remote MCP tool group. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServerConfig {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub server_label: String,
    pub server_url: String,
    #[serde(default)]
    pub allowed_tools: Vec<String>,
    #[serde(default)]
    pub require_approval: ApprovalPolicy,
}

/// Load and validate MCP tool descriptors from a JSON file.
pub fn load_tool_config(path: &Path) -> Result<Vec<McpServerConfig>, ConfigError> {
    debug!(path = %path.display(), "Reading tool configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if content.trim().is_empty() {
        return Err(ConfigError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let data: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        line: source.line(),
        column: source.column(),
        source,
    })?;

    let elements = match data {
        Value::Object(_) => vec![data],
        Value::Array(items) => items,
        other => {
            return Err(ConfigError::InvalidRoot {
                path: path.to_path_buf(),
                found: json_type_name(&other),
            });
        }
    };

    let mut tools = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let tool: McpServerConfig =
            serde_json::from_value(element).map_err(|source| ConfigError::InvalidTool {
                path: path.to_path_buf(),
                index,
                source,
            })?;
        if let Err(err) = reqwest::Url::parse(&tool.server_url) {
            return Err(ConfigError::InvalidUrl {
                label: tool.server_label.clone(),
                url: tool.server_url.clone(),
                reason: err.to_string(),
            });
        }
        tools.push(tool);
    }

    debug!(count = tools.len(), "Loaded MCP tool descriptors");
    Ok(tools)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
