//! Application constants
//!
//! Single source of truth for default paths and prompts.

/// Default tool configuration file path
pub const DEFAULT_TOOLS_PATH: &str = "tools.json";

/// Default system instructions when none are provided on the command line
pub const DEFAULT_SYSTEM_PROMPT: &str = "Respond the user queries based on the provided tools";
