mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod tools;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::ticket::{self, TicketArgs};
use crate::cmd::tool::{self as tool_cmd, ToolArgs, ToolCommand};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::jira::JiraClient;

#[derive(Parser)]
#[command(
    name = "helpdesk",
    author,
    version,
    about = "Ticket gateway for the customer support agents"
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list, and inspect customer tickets.
    Ticket(TicketArgs),
    /// Inspect or invoke the agent tools.
    Tool(ToolArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(cli.command).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Tool(ToolArgs {
            command: ToolCommand::List,
        }) => print_json(&tool_cmd::list(&tools::default_registry())?),
        Commands::Tool(ToolArgs {
            command: ToolCommand::Call { name, args },
        }) => {
            let ctx = build_context()?;
            let registry = tools::default_registry();
            let response = tool_cmd::call(&ctx, &registry, &name, &args).await?;
            print_json(&response)
        }
        Commands::Ticket(args) => {
            let ctx = build_context()?;
            let response = ticket::run(&ctx, args.command).await?;
            print_json(&response)
        }
    }
}

/// Loads configuration and wires the tracker client. Fails before any
/// request is made when credentials are incomplete; `ticket` and
/// `tool call` both go through here.
fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    let issue_tracker = Arc::new(JiraClient::new(&config.jira)?);
    let context = AppContext::new(config, issue_tracker);

    info!(
        project = %context.config.jira.project_key,
        "ticket gateway ready"
    );
    debug!(
        api_base = %context.config.jira.api_base,
        owner_field = %context.config.jira.owner_field,
        timeout_secs = context.config.jira.timeout.as_secs(),
        "tracker settings"
    );
    Ok(context)
}

fn print_json(value: &Value) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
