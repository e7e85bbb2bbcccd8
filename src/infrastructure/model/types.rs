//! Request and error types for the completion backend.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// One outbound request to the Responses endpoint.
///
/// Generation parameters are flattened in verbatim; this layer never
/// interprets them.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    pub tool_choice: String,
    pub truncation: String,
    /// Schema constraint marking this as a structured-output request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ResponsesRequest {
    pub fn new(model: impl Into<String>, input: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            input,
            tools: None,
            tool_choice: "auto".to_string(),
            truncation: "auto".to_string(),
            text: None,
            params: Map::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }

    pub fn with_text_format(mut self, format: Value) -> Self {
        self.text = Some(format);
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }
}

/// Completion backend errors. One round trip, no retries: every failure
/// surfaces to the caller immediately.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error calling completion endpoint: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("completion endpoint returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("completion rejected by provider ({code}): {message}")]
    Provider { code: String, message: String },

    #[error("invalid completion response: {reason}")]
    InvalidResponse { reason: String },
}

impl CompletionError {
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network { source }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}
