use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::constants::{DEFAULT_SYSTEM_PROMPT, DEFAULT_TOOLS_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "mcp-chat",
    version,
    about = "Chat or parse with an LLM using remote MCP tools"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat, or one-shot when stdin is piped
    Chat(ChatArgs),
    /// One-shot structured output validated against a registered schema
    Parse(ParseArgs),
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Registry key of the expected output schema, e.g. 'bucket_list'
    #[arg(long)]
    pub output_format: String,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the JSON file with MCP tool descriptors
    #[arg(long, default_value = DEFAULT_TOOLS_PATH)]
    pub tool_config: PathBuf,
    /// System instructions seeding the session
    #[arg(long, default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system: String,
    /// JSON object of generation parameters, e.g. '{"temperature":0.2}'
    #[arg(long)]
    pub llm_params: Option<String>,
    /// Tool groups to expose: 'all', 'none', or a comma-separated list of
    /// server labels and/or tool names
    #[arg(long, default_value = "all")]
    pub tools: String,
}
