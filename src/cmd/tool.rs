use clap::{Args, Subcommand};
use serde_json::Value;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::tools::ToolRegistry;

#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    #[command(subcommand)]
    pub command: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ToolCommand {
    /// Print the tool definitions offered to the agents.
    List,
    /// Invoke a tool with JSON arguments.
    ///
    /// Every call loads the tracker configuration first, including
    /// `set_language`, so the JIRA_* variables must be set.
    Call {
        name: String,
        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

pub fn list(registry: &ToolRegistry) -> AppResult<Value> {
    Ok(serde_json::to_value(registry.definitions())?)
}

pub async fn call(
    ctx: &AppContext,
    registry: &ToolRegistry,
    name: &str,
    raw_args: &str,
) -> AppResult<Value> {
    let arguments: Value = serde_json::from_str(raw_args)
        .map_err(|err| AppError::InvalidArguments(format!("arguments are not valid JSON: {err}")))?;
    if !arguments.is_object() {
        return Err(AppError::InvalidArguments(
            "arguments must be a JSON object".to_string(),
        ));
    }
    registry.call(ctx, name, &arguments).await
}
