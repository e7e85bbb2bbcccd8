use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Assistant,
    Tool,
}

impl TurnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::Tool => "tool",
        }
    }
}

/// A single message turn in the conversation transcript. Immutable once
/// appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Which configured tool groups to expose to the model for a request.
///
/// `Only` matches server labels and/or allowed tool names; an entry matching
/// neither exposes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSelection {
    All,
    None,
    Only(Vec<String>),
}

impl ToolSelection {
    /// Parse the `--tools` flag value: `all`, `none`, or a comma-separated
    /// list of names.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => ToolSelection::All,
            "none" => ToolSelection::None,
            other => ToolSelection::Only(
                other
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}

/// Outcome of one completion round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    /// Free-text assistant reply.
    FinalText(String),
    /// Schema-validated structured reply.
    Structured(Value),
    /// The remote surfaced a tool invocation this client cannot resolve.
    ToolCall { tool_name: String, arguments: Value },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_and_none_selections() {
        assert_eq!(ToolSelection::parse("all"), ToolSelection::All);
        assert_eq!(ToolSelection::parse(""), ToolSelection::All);
        assert_eq!(ToolSelection::parse("none"), ToolSelection::None);
    }

    #[test]
    fn parses_name_list_selection() {
        let selection = ToolSelection::parse("s3, list_buckets ,");
        assert_eq!(
            selection,
            ToolSelection::Only(vec!["s3".to_string(), "list_buckets".to_string()])
        );
    }

    #[test]
    fn role_tokens_match_wire_format() {
        assert_eq!(TurnRole::System.as_str(), "system");
        assert_eq!(TurnRole::Tool.as_str(), "tool");
    }
}
