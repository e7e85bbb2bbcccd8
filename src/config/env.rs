//! Completion endpoint settings from the process environment.
//!
//! All credential state lives in one struct, read exactly once at startup
//! and passed explicitly to the completion client.

use std::env;

use super::error::ConfigError;

pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
pub const DEPLOYMENT_VAR: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const API_VERSION_VAR: &str = "OPENAI_API_VERSION";

pub const DEFAULT_API_VERSION: &str = "2025-04-01-preview";

/// Connection settings for the hosted completion service.
#[derive(Debug, Clone)]
pub struct CompletionEnv {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl CompletionEnv {
    /// Read the environment, failing fast when a required variable is
    /// absent or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: require(ENDPOINT_VAR)?,
            api_key: require(API_KEY_VAR)?,
            deployment: require(DEPLOYMENT_VAR)?,
            api_version: optional(API_VERSION_VAR)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::MissingEnv { var })
}

fn optional(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
