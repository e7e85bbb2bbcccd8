//! Completion backend: request/response types, wire adapter, and the HTTP
//! client for the hosted Responses endpoint.

pub mod adapter;
pub mod client;
pub mod protocol;
pub mod types;

pub use adapter::RequestAdapter;
pub use client::{CompletionBackend, ResponsesClient};
pub use protocol::{PendingToolCall, ResponsesPayload};
pub use types::{CompletionError, ResponsesRequest};
