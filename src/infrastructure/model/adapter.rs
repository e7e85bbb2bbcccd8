//! Adapters converting domain values into the Responses wire format.

use serde_json::{Value, json};

use crate::config::McpServerConfig;
use crate::domain::schema::OutputSchema;
use crate::domain::types::ChatTurn;

pub struct RequestAdapter;

impl RequestAdapter {
    /// Convert conversation turns to Responses input items.
    /// Returns: [{"role": "...", "content": "..."}]
    pub fn to_responses_input(turns: &[ChatTurn]) -> Vec<Value> {
        turns
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.as_str(),
                    "content": turn.content.clone()
                })
            })
            .collect()
    }

    /// Translate tool descriptors to MCP tool declarations, preserving the
    /// allowed-tool filter and approval policy. An empty filter means the
    /// whole group is callable, so the field is omitted.
    pub fn to_tool_declarations(tools: &[&McpServerConfig]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                let mut declaration = json!({
                    "type": "mcp",
                    "server_label": tool.server_label.clone(),
                    "server_url": tool.server_url.clone(),
                    "require_approval": tool.require_approval.as_str(),
                });
                if !tool.allowed_tools.is_empty()
                    && let Some(fields) = declaration.as_object_mut()
                {
                    fields.insert("allowed_tools".to_string(), json!(tool.allowed_tools));
                }
                declaration
            })
            .collect()
    }

    /// Build the `text.format` constraint marking a schema-bound request.
    pub fn to_schema_format(schema: &dyn OutputSchema) -> Value {
        json!({
            "format": {
                "type": "json_schema",
                "name": schema.key(),
                "schema": schema.json_schema(),
                "strict": true
            }
        })
    }
}
