//! Wire-level response payload of the Responses API, with discrimination
//! helpers: final assistant text, pending tool call, provider failure.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// An item in the response `output`: an assistant message or a tool event.
/// Only message items are guaranteed to carry role and content.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<ContentItem>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub server_label: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// A tool invocation the remote surfaced instead of resolving.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingToolCall {
    pub tool_name: String,
    pub arguments: Value,
}

impl ResponsesPayload {
    /// Provider-level failure reported inside a successful HTTP exchange.
    pub fn failure(&self) -> Option<(String, String)> {
        if let Some(error) = &self.error {
            return Some((
                error.code.clone().unwrap_or_else(|| "error".to_string()),
                error
                    .message
                    .clone()
                    .unwrap_or_else(|| "no error detail".to_string()),
            ));
        }
        if self.status.as_deref() == Some("failed") {
            return Some((
                "failed".to_string(),
                "response status reported as failed".to_string(),
            ));
        }
        None
    }

    /// First tool invocation awaiting approval, if any. Completed tool
    /// events (`mcp_call`) do not count; the remote already resolved those.
    pub fn pending_tool_call(&self) -> Option<PendingToolCall> {
        self.output
            .iter()
            .find(|item| item.kind == "mcp_approval_request")
            .map(|item| PendingToolCall {
                tool_name: item
                    .name
                    .clone()
                    .or_else(|| item.server_label.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                arguments: decode_arguments(item.arguments.as_ref()),
            })
    }

    /// Concatenated text of assistant message items, fragments joined by
    /// blank lines. Falls back to the first content text of any item when no
    /// strict assistant message matched.
    pub fn output_text(&self) -> Option<String> {
        let mut texts: Vec<&str> = Vec::new();
        for item in &self.output {
            if item.kind != "message" || item.role.as_deref() != Some("assistant") {
                continue;
            }
            let Some(content) = &item.content else {
                continue;
            };
            for fragment in content {
                if let Some(text) = fragment.text.as_deref()
                    && !text.trim().is_empty()
                {
                    texts.push(text);
                }
            }
        }
        if !texts.is_empty() {
            return Some(texts.join("\n\n"));
        }

        self.output.iter().find_map(|item| {
            item.content
                .as_ref()
                .and_then(|content| content.first())
                .and_then(|fragment| fragment.text.clone())
        })
    }
}

fn decode_arguments(raw: Option<&Value>) -> Value {
    match raw {
        None => Value::Null,
        // Tool arguments arrive JSON-encoded inside a string.
        Some(Value::String(encoded)) => serde_json::from_str(encoded)
            .unwrap_or_else(|_| Value::String(encoded.clone())),
        Some(other) => other.clone(),
    }
}
