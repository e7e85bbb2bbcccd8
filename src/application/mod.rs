//! # Application Module
//!
//! Orchestration logic sitting between the CLI and the completion backend.
//!
//! ## Submodules
//!
//! - [`session`] - In-memory conversation transcript
//! - [`service`] - Chat/parse orchestration over a completion backend
//! - [`render`] - Rendering completion results for the output stream
//! - [`repl`] - Interactive loop and one-shot runners

pub mod render;
pub mod repl;
pub mod service;
pub mod session;

pub use service::{ChatError, ChatService, ServiceConfig};
pub use session::ChatSession;
