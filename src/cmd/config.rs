use clap::{Args, Subcommand};

use crate::config::{DEFAULT_API_BASE, DEFAULT_OWNER_FIELD, DEFAULT_TIMEOUT_SECS, EnvConfig};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration read from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = EnvConfig::load();

    println!("Jira project: {}", display_value(&cfg.jira_project));
    println!("Jira cloud id: {}", display_value(&cfg.jira_cloud));
    println!("Jira email: {}", display_value(&cfg.jira_email));
    println!("Jira API token: {}", mask_secret(&cfg.jira_token));
    println!(
        "Owner field: {}",
        display_or_default(&cfg.jira_owner_field, DEFAULT_OWNER_FIELD)
    );
    println!(
        "API base: {}",
        display_or_default(&cfg.jira_api_base, DEFAULT_API_BASE)
    );
    println!(
        "Timeout (seconds): {}",
        display_or_default(&cfg.jira_timeout_secs, &DEFAULT_TIMEOUT_SECS.to_string())
    );

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn display_or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref().filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => format!("{default} (default)"),
    }
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
