//! Rendering completion results for the output stream.

use crate::domain::types::CompletionResult;

use super::service::ChatError;

/// Render a completion result as the line(s) to print.
///
/// A tool call reaching this layer means the remote did not resolve it; the
/// CLI never executes tools locally, so that is reported as a defect rather
/// than silently dropped.
pub fn render(result: &CompletionResult) -> Result<String, ChatError> {
    match result {
        CompletionResult::FinalText(text) => Ok(text.clone()),
        CompletionResult::Structured(value) => serde_json::to_string_pretty(value)
            .map_err(|source| ChatError::MalformedStructured { source }),
        CompletionResult::ToolCall { tool_name, .. } => Err(ChatError::UnresolvedToolCall {
            tool_name: tool_name.clone(),
        }),
    }
}
