pub mod env;
pub mod error;
pub mod params;
pub mod tools;

pub use env::CompletionEnv;
pub use error::ConfigError;
pub use params::parse_llm_params;
pub use tools::{ApprovalPolicy, McpServerConfig, ToolKind, load_tool_config};
