use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tool configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read tool configuration from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tool configuration file {path:?} is empty")]
    EmptyFile { path: PathBuf },

    #[error("invalid JSON in tool configuration {path:?} at line {line}, column {column}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("tool configuration {path:?} must contain a JSON object or an array of objects (got {found})")]
    InvalidRoot { path: PathBuf, found: &'static str },

    #[error("invalid tool entry at index {index} in {path:?}: {source}")]
    InvalidTool {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("tool '{label}' has an invalid server_url '{url}': {reason}")]
    InvalidUrl {
        label: String,
        url: String,
        reason: String,
    },

    #[error("environment variable {var} is required but not set")]
    MissingEnv { var: &'static str },

    #[error("--llm-params must be a JSON object, e.g. '{{\"temperature\":0.2}}'")]
    ParamsNotObject,

    #[error("invalid JSON in --llm-params at line {line}, column {column}: {source}")]
    ParamsParse {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}
