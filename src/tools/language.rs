use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::context::AppContext;
use crate::domain::language::Language;
use crate::error::AppResult;
use crate::tools::{Tool, string_arg};

/// Records the language the supervisor detected for the conversation.
pub struct SetLanguageTool;

#[async_trait]
impl Tool for SetLanguageTool {
    fn name(&self) -> &'static str {
        "set_language"
    }

    fn description(&self) -> &'static str {
        "Set the language detected from the customer's message."
    }

    fn parameters_schema(&self) -> Value {
        let names: Vec<_> = Language::ALL.iter().map(Language::as_str).collect();
        json!({
            "type": "object",
            "properties": {
                "language": {"type": "string", "enum": names}
            },
            "required": ["language"]
        })
    }

    async fn execute(&self, _ctx: &AppContext, arguments: &Value) -> AppResult<Value> {
        let raw = string_arg(arguments, "language")?;
        let Some(language) = Language::from_str(raw) else {
            return Ok(json!({
                "status_code": 400,
                "error": format!("Unsupported language: {raw}"),
            }));
        };

        info!(language = language.as_str(), "conversation language set");
        Ok(json!({
            "language": language.as_str(),
            "message": format!("Language set to {}", language.as_str()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::{AppConfig, JiraSettings};
    use crate::infra::jira::JiraClient;

    fn context() -> AppContext {
        let config = AppConfig {
            jira: JiraSettings {
                api_base: "http://127.0.0.1:1".to_string(),
                cloud_id: "cloud-1".to_string(),
                project_key: "GEN".to_string(),
                email: "bot@example.com".to_string(),
                token: "secret-token".to_string(),
                owner_field: "customfield_10088".to_string(),
                timeout: Duration::from_secs(1),
            },
        };
        let client = JiraClient::new(&config.jira).unwrap();
        AppContext::new(config, Arc::new(client))
    }

    #[tokio::test]
    async fn normalises_language_name() {
        let response = SetLanguageTool
            .execute(&context(), &json!({"language": "Sinhala"}))
            .await
            .unwrap();
        assert_eq!(response["language"], "sinhala");
        assert_eq!(response["message"], "Language set to sinhala");
    }

    #[tokio::test]
    async fn rejects_unsupported_language() {
        let response = SetLanguageTool
            .execute(&context(), &json!({"language": "french"}))
            .await
            .unwrap();
        assert_eq!(response["status_code"], 400);
    }
}
