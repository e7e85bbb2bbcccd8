//! HTTP client for the hosted Responses endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::CompletionEnv;

use super::protocol::ResponsesPayload;
use super::types::{CompletionError, ResponsesRequest};

/// One-round-trip completion transport. No retries, no caching; a failure
/// surfaces to the caller as a [`CompletionError`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn create(&self, request: &ResponsesRequest) -> Result<ResponsesPayload, CompletionError>;
}

#[derive(Clone)]
pub struct ResponsesClient {
    http: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
}

impl ResponsesClient {
    pub fn new(env: &CompletionEnv) -> Self {
        Self {
            http: Client::new(),
            endpoint: env.endpoint.clone(),
            api_key: env.api_key.clone(),
            api_version: env.api_version.clone(),
        }
    }

    fn build_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!(
            "{base}/openai/v1/responses?api-version={}",
            self.api_version
        )
    }
}

#[async_trait]
impl CompletionBackend for ResponsesClient {
    async fn create(&self, request: &ResponsesRequest) -> Result<ResponsesPayload, CompletionError> {
        let url = self.build_url();

        info!(
            model = request.model.as_str(),
            input_items = request.input.len(),
            tool_groups = request.tools.as_ref().map(Vec::len).unwrap_or(0),
            structured = request.text.is_some(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(CompletionError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::api(
                status.as_u16(),
                error_message_from(&body),
            ));
        }

        let payload = response
            .json::<ResponsesPayload>()
            .await
            .map_err(|source| CompletionError::invalid_response(source.to_string()))?;
        debug!(
            response_id = payload.id.as_deref().unwrap_or(""),
            status = payload.status.as_deref().unwrap_or(""),
            "Received completion response"
        );
        Ok(payload)
    }
}

/// Pull the human-readable message out of an error body, falling back to the
/// raw text.
fn error_message_from(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no error detail".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
