//! Functions exposed to the conversational agents.
//!
//! Each tool takes a JSON object of primitive arguments and answers with
//! a JSON mapping. Tracker failures are part of that mapping (an `error`
//! key next to `status_code`); only malformed arguments are reported as
//! `AppError`.

pub mod language;
pub mod ticket;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    /// Sent to the model alongside the schema.
    fn description(&self) -> &'static str;

    fn parameters_schema(&self) -> Value;

    async fn execute(&self, ctx: &AppContext, arguments: &Value) -> AppResult<Value>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            parameters: self.parameters_schema(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.retain(|existing| existing.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.to_definition()).collect()
    }

    pub async fn call(&self, ctx: &AppContext, name: &str, arguments: &Value) -> AppResult<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| AppError::InvalidArguments(format!("unknown tool '{name}'")))?;
        tool.execute(ctx, arguments).await
    }
}

/// Registry with the ticket tools and the language selector.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ticket::CreateTicketTool));
    registry.register(Box::new(ticket::ListTicketsTool));
    registry.register(Box::new(ticket::GetTicketTool));
    registry.register(Box::new(language::SetLanguageTool));
    registry
}

pub(crate) fn string_arg<'a>(arguments: &'a Value, key: &str) -> AppResult<&'a str> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::InvalidArguments(format!("missing '{key}' argument")))
}
