pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{ChatError, ChatService, ChatSession, ServiceConfig};
pub use cli::{Cli, Command};
pub use config::{ApprovalPolicy, CompletionEnv, ConfigError, McpServerConfig};
pub use domain::{CompletionResult, SchemaRegistry, ToolSelection};
pub use infrastructure::model;

use std::error::Error;
use std::io::IsTerminal;

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use application::repl;
use cli::{CommonArgs, ParseArgs};
use config::{load_tool_config, parse_llm_params};
use infrastructure::model::ResponsesClient;

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    let stdin_is_terminal = std::io::stdin().is_terminal();
    init_tracing(stdin_is_terminal);
    info!("Starting mcp-chat");

    let env = CompletionEnv::from_env()?;
    debug!(
        endpoint = env.endpoint.as_str(),
        deployment = env.deployment.as_str(),
        api_version = env.api_version.as_str(),
        "Completion endpoint configured"
    );

    match cli.command {
        Command::Chat(args) => {
            let (mut service, selection) = build_service(&env, &args.common)?;
            if stdin_is_terminal {
                repl::interactive(&mut service, &selection, &args.common.system).await?;
            } else {
                repl::one_shot(&mut service, None, &selection).await?;
            }
        }
        Command::Parse(args) => {
            let schema = resolve_output_schema(&args)?;
            let (mut service, selection) = build_service(&env, &args.common)?;
            if stdin_is_terminal {
                if let Some(prompt) = repl::prompt_once().await? {
                    let reply =
                        repl::run_turn(&mut service, Some(schema.as_ref()), &selection, &prompt)
                            .await?;
                    println!("{reply}");
                }
            } else {
                repl::one_shot(&mut service, Some(schema.as_ref()), &selection).await?;
            }
        }
    }

    info!("Client execution finished");
    Ok(())
}

fn build_service(
    env: &CompletionEnv,
    common: &CommonArgs,
) -> Result<(ChatService<ResponsesClient>, ToolSelection), Box<dyn Error>> {
    let tools = load_tool_config(&common.tool_config)?;
    info!(
        path = %common.tool_config.display(),
        tool_groups = tools.len(),
        "Loaded tool configuration"
    );

    let params = parse_llm_params(common.llm_params.as_deref())?;
    let selection = ToolSelection::parse(&common.tools);

    let backend = ResponsesClient::new(env);
    let config = ServiceConfig::new(env.deployment.clone())
        .with_system_prompt(common.system.clone())
        .with_tools(tools)
        .with_params(params);
    Ok((ChatService::new(backend, config), selection))
}

fn resolve_output_schema(
    args: &ParseArgs,
) -> Result<std::sync::Arc<dyn domain::OutputSchema>, Box<dyn Error>> {
    let registry = SchemaRegistry::builtin();
    let schema = registry.resolve(&args.output_format)?;
    debug!(format = schema.key(), "Resolved output schema");
    Ok(schema)
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
