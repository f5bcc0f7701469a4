use async_trait::async_trait;
use serde_json::{Value, json};

use crate::context::AppContext;
use crate::domain::ticket::TicketCreationRequest;
use crate::error::AppResult;
use crate::tools::{Tool, string_arg};
use crate::workflow::ticket::{check_ticket_status, file_complaint, list_owner_tickets};

pub struct CreateTicketTool;

#[async_trait]
impl Tool for CreateTicketTool {
    fn name(&self) -> &'static str {
        "create_jira_ticket"
    }

    fn description(&self) -> &'static str {
        "Create a support ticket for the customer. \
         Returns the ticket key (e.g. 'GEN-23') the customer can quote later."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "string", "description": "Unique id of the customer"},
                "summary": {"type": "string", "description": "Short title of the issue"},
                "description": {
                    "type": "string",
                    "description": "Detailed description of the issue"
                },
                "issue_type": {
                    "type": "string",
                    "description": "Tracker issue type, normally 'Task'"
                }
            },
            "required": ["user_id", "summary", "description", "issue_type"]
        })
    }

    async fn execute(&self, ctx: &AppContext, arguments: &Value) -> AppResult<Value> {
        let request = TicketCreationRequest {
            owner_id: string_arg(arguments, "user_id")?.to_string(),
            summary: string_arg(arguments, "summary")?.to_string(),
            description: string_arg(arguments, "description")?.to_string(),
            category: string_arg(arguments, "issue_type")?.to_string(),
        };
        file_complaint(ctx, request).await
    }
}

pub struct ListTicketsTool;

#[async_trait]
impl Tool for ListTicketsTool {
    fn name(&self) -> &'static str {
        "get_user_tickets"
    }

    fn description(&self) -> &'static str {
        "List the customer's tickets as ticket_id and summary pairs."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "string", "description": "Unique id of the customer"}
            },
            "required": ["user_id"]
        })
    }

    async fn execute(&self, ctx: &AppContext, arguments: &Value) -> AppResult<Value> {
        let owner_id = string_arg(arguments, "user_id")?;
        list_owner_tickets(ctx, owner_id).await
    }
}

pub struct GetTicketTool;

#[async_trait]
impl Tool for GetTicketTool {
    fn name(&self) -> &'static str {
        "get_ticket_by_key"
    }

    fn description(&self) -> &'static str {
        "Fetch one of the customer's tickets by key, including status and resolution."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "string", "description": "Unique id of the customer"},
                "ticket_id": {"type": "string", "description": "Ticket key, e.g. 'GEN-23'"}
            },
            "required": ["user_id", "ticket_id"]
        })
    }

    async fn execute(&self, ctx: &AppContext, arguments: &Value) -> AppResult<Value> {
        let owner_id = string_arg(arguments, "user_id")?;
        let ticket_id = string_arg(arguments, "ticket_id")?;
        check_ticket_status(ctx, owner_id, ticket_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{AppConfig, JiraSettings};
    use crate::error::AppError;
    use crate::infra::jira::JiraClient;
    use crate::tools::default_registry;

    fn context(api_base: &str) -> AppContext {
        let config = AppConfig {
            jira: JiraSettings {
                api_base: api_base.to_string(),
                cloud_id: "cloud-1".to_string(),
                project_key: "GEN".to_string(),
                email: "bot@example.com".to_string(),
                token: "secret-token".to_string(),
                owner_field: "customfield_10088".to_string(),
                timeout: Duration::from_secs(10),
            },
        };
        let client = JiraClient::new(&config.jira).unwrap();
        AppContext::new(config, Arc::new(client))
    }

    #[tokio::test]
    async fn create_tool_returns_tracker_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ex/jira/cloud-1/rest/api/3/issue"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10001",
                "key": "GEN-23",
                "self": "https://api.atlassian.com/ex/jira/cloud-1/rest/api/3/issue/10001"
            })))
            .mount(&server)
            .await;

        let response = default_registry()
            .call(
                &context(&server.uri()),
                "create_jira_ticket",
                &json!({
                    "user_id": "user123",
                    "summary": "Test Issue",
                    "description": "Test description",
                    "issue_type": "Task"
                }),
            )
            .await
            .unwrap();

        assert_eq!(response["key"], "GEN-23");
        assert_eq!(response["status_code"], 201);
        assert!(response.get("error").is_none());
    }

    #[tokio::test]
    async fn get_tool_reports_missing_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ex/jira/cloud-1/rest/api/3/search/jql"))
            .and(query_param("maxResults", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"issues": []})))
            .mount(&server)
            .await;

        let response = default_registry()
            .call(
                &context(&server.uri()),
                "get_ticket_by_key",
                &json!({"user_id": "user123", "ticket_id": "GEN-999"}),
            )
            .await
            .unwrap();

        assert_eq!(
            response,
            json!({"status_code": 404, "error": "Ticket GEN-999 not found for user user123"})
        );
    }

    #[tokio::test]
    async fn list_tool_requires_user_id() {
        let err = default_registry()
            .call(&context("http://127.0.0.1:1"), "get_user_tickets", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArguments(_)));
    }
}
