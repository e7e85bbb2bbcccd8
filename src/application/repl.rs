//! Interactive loop and one-shot runners.
//!
//! Mode is decided by the caller from stdin: piped input runs exactly one
//! request/response cycle; a terminal gets the read loop (`chat`) or a
//! single prompt (`parse`).

use std::error::Error;
use std::io::Read;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::warn;

use crate::constants::DEFAULT_SYSTEM_PROMPT;
use crate::domain::schema::OutputSchema;
use crate::domain::types::ToolSelection;
use crate::infrastructure::model::CompletionBackend;

use super::render;
use super::service::{ChatError, ChatService};

/// Read the whole piped stdin, run one cycle, print the reply.
/// Any failure propagates so the process exits non-zero.
pub async fn one_shot<B: CompletionBackend>(
    service: &mut ChatService<B>,
    schema: Option<&dyn OutputSchema>,
    selection: &ToolSelection,
) -> Result<(), Box<dyn Error>> {
    let prompt = read_piped_input()?;
    let reply = run_turn(service, schema, selection, &prompt).await?;
    println!("{reply}");
    Ok(())
}

/// Interactive chat loop. Empty line, end of input, or Ctrl+C ends the
/// session normally; per-turn completion failures are reported and the loop
/// continues.
pub async fn interactive<B: CompletionBackend>(
    service: &mut ChatService<B>,
    selection: &ToolSelection,
    system: &str,
) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();

    stdout
        .write_all(b"Interactive chat. Empty line or Ctrl+C to exit.\n")
        .await?;
    if system != DEFAULT_SYSTEM_PROMPT {
        stdout
            .write_all(format!("[system set] {system}\n").as_bytes())
            .await?;
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            _ = signal::ctrl_c() => {
                stdout.write_all(b"\nBye!\n").await?;
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        // EOF or empty line: terminate without issuing another request.
        let Some(line) = line else { break };
        let prompt = line.trim();
        if prompt.is_empty() {
            break;
        }

        match run_turn(service, None, selection, prompt).await {
            Ok(reply) => {
                stdout.write_all(reply.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Err(err) => {
                warn!(error = %err, "Completion turn failed");
                stdout
                    .write_all(format!("error: {err}\n").as_bytes())
                    .await?;
            }
        }
    }

    stdout.write_all(b"Bye!\n").await?;
    Ok(())
}

/// Prompt for a single line on a terminal (the `parse` path). Returns `None`
/// on empty input or EOF, which ends the invocation normally.
pub async fn prompt_once() -> Result<Option<String>, Box<dyn Error>> {
    let mut stdout = io::stdout();
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();
    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };
    let prompt = line.trim().to_string();
    if prompt.is_empty() {
        return Ok(None);
    }
    Ok(Some(prompt))
}

/// One request/response cycle rendered for printing.
pub async fn run_turn<B: CompletionBackend>(
    service: &mut ChatService<B>,
    schema: Option<&dyn OutputSchema>,
    selection: &ToolSelection,
    prompt: &str,
) -> Result<String, ChatError> {
    let result = match schema {
        Some(schema) => service.parse(prompt, schema, selection).await?,
        None => service.send(prompt, selection).await?,
    };
    render::render(&result)
}

fn read_piped_input() -> Result<String, Box<dyn Error>> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let prompt = buffer.trim().to_string();
    if prompt.is_empty() {
        return Err("no input provided on stdin".into());
    }
    Ok(prompt)
}
