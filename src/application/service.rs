//! Chat service orchestrating the session, request composition, and the
//! completion backend.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::McpServerConfig;
use crate::domain::schema::{OutputSchema, SchemaError};
use crate::domain::types::{CompletionResult, ToolSelection, TurnRole};
use crate::infrastructure::model::{
    CompletionBackend, CompletionError, RequestAdapter, ResponsesRequest,
};

use super::session::ChatSession;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("remote left tool call '{tool_name}' unresolved")]
    UnresolvedToolCall { tool_name: String },

    #[error("structured reply is not valid JSON: {source}")]
    MalformedStructured {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub model: String,
    pub system_prompt: Option<String>,
    pub tools: Vec<McpServerConfig>,
    pub params: Map<String, Value>,
}

impl ServiceConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<McpServerConfig>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }
}

pub struct ChatService<B> {
    backend: B,
    config: ServiceConfig,
    session: ChatSession,
}

impl<B: CompletionBackend> ChatService<B> {
    pub fn new(backend: B, config: ServiceConfig) -> Self {
        let session = match &config.system_prompt {
            Some(prompt) => ChatSession::with_system(prompt.clone()),
            None => ChatSession::new(),
        };
        Self {
            backend,
            config,
            session,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn tools(&self) -> &[McpServerConfig] {
        &self.config.tools
    }

    /// Send a user message and return the assistant's reply.
    ///
    /// The user and assistant turns are recorded only after a successful
    /// text reply, so a failed round trip leaves the transcript untouched.
    pub async fn send(
        &mut self,
        prompt: &str,
        selection: &ToolSelection,
    ) -> Result<CompletionResult, ChatError> {
        let payload = {
            let request = self.compose(prompt, selection, None);
            self.backend.create(&request).await?
        };

        self.log_usage(&payload);
        if let Some((code, message)) = payload.failure() {
            return Err(CompletionError::provider(code, message).into());
        }
        if let Some(call) = payload.pending_tool_call() {
            info!(
                tool = call.tool_name.as_str(),
                "Remote surfaced a tool call instead of resolving it"
            );
            return Ok(CompletionResult::ToolCall {
                tool_name: call.tool_name,
                arguments: call.arguments,
            });
        }

        let text = payload
            .output_text()
            .ok_or_else(|| CompletionError::invalid_response("no assistant text in response"))?;

        self.session.append(TurnRole::User, prompt);
        self.session.append(TurnRole::Assistant, text.as_str());
        Ok(CompletionResult::FinalText(text))
    }

    /// Send a user message with a schema constraint and return the validated
    /// structured reply.
    ///
    /// Only the user turn is recorded; the structured reply is not a text
    /// message. A tool call surfacing here is an explicit error.
    pub async fn parse(
        &mut self,
        prompt: &str,
        schema: &dyn OutputSchema,
        selection: &ToolSelection,
    ) -> Result<CompletionResult, ChatError> {
        let payload = {
            let request = self.compose(prompt, selection, Some(schema));
            self.backend.create(&request).await?
        };

        self.log_usage(&payload);
        if let Some((code, message)) = payload.failure() {
            return Err(CompletionError::provider(code, message).into());
        }
        self.session.append(TurnRole::User, prompt);

        if let Some(call) = payload.pending_tool_call() {
            return Err(ChatError::UnresolvedToolCall {
                tool_name: call.tool_name,
            });
        }

        let text = payload
            .output_text()
            .ok_or_else(|| CompletionError::invalid_response("no structured output in response"))?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|source| ChatError::MalformedStructured { source })?;
        let validated = schema.validate(&value)?;
        Ok(CompletionResult::Structured(validated))
    }

    fn compose(
        &self,
        prompt: &str,
        selection: &ToolSelection,
        schema: Option<&dyn OutputSchema>,
    ) -> ResponsesRequest {
        let mut input = RequestAdapter::to_responses_input(self.session.snapshot());
        input.push(serde_json::json!({
            "role": TurnRole::User.as_str(),
            "content": prompt
        }));

        debug!(
            history = self.session.len(),
            structured = schema.is_some(),
            "Composing completion request"
        );

        let mut request = ResponsesRequest::new(self.config.model.clone(), input)
            .with_params(self.config.params.clone());
        if let Some(tools) = self.resolve_tools(selection) {
            request = request.with_tools(RequestAdapter::to_tool_declarations(&tools));
        }
        if let Some(schema) = schema {
            request = request.with_text_format(RequestAdapter::to_schema_format(schema));
        }
        request
    }

    /// Select which configured tool groups to expose for this request.
    /// A name in `Only` matches a server label or an allowed tool name.
    fn resolve_tools(&self, selection: &ToolSelection) -> Option<Vec<&McpServerConfig>> {
        let tools = &self.config.tools;
        match selection {
            ToolSelection::None => None,
            ToolSelection::All => {
                if tools.is_empty() {
                    None
                } else {
                    Some(tools.iter().collect())
                }
            }
            ToolSelection::Only(names) => {
                let wanted: Vec<&str> = names
                    .iter()
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .collect();
                if wanted.is_empty() {
                    return None;
                }
                let selected: Vec<&McpServerConfig> = tools
                    .iter()
                    .filter(|tool| {
                        wanted.contains(&tool.server_label.as_str())
                            || tool
                                .allowed_tools
                                .iter()
                                .any(|allowed| wanted.contains(&allowed.as_str()))
                    })
                    .collect();
                if selected.is_empty() { None } else { Some(selected) }
            }
        }
    }

    fn log_usage(&self, payload: &crate::infrastructure::model::ResponsesPayload) {
        if let Some(usage) = &payload.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                "Token usage for completion"
            );
        }
    }
}
