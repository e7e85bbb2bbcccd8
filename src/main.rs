use std::error::Error;

use clap::Parser;
use mcp_chat::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    mcp_chat::run(cli).await
}
