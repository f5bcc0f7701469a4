use serde_json::{Value, json};
use tracing::info;

use crate::context::AppContext;
use crate::domain::ticket::TicketCreationRequest;
use crate::error::{AppResult, GatewayError};

/// Files a complaint and returns `{status_code, id, key, self}` or
/// `{status_code, error}`.
pub async fn file_complaint(ctx: &AppContext, request: TicketCreationRequest) -> AppResult<Value> {
    match ctx.issue_tracker.create_ticket(request).await {
        Ok(created) => {
            info!(key = %created.key, "ticket created");
            Ok(serde_json::to_value(created)?)
        }
        Err(err) => Ok(error_response(&err)),
    }
}

pub async fn list_owner_tickets(ctx: &AppContext, owner_id: &str) -> AppResult<Value> {
    match ctx.issue_tracker.list_tickets_for_owner(owner_id).await {
        Ok(tickets) => Ok(json!({
            "status_code": 200,
            "tickets": serde_json::to_value(tickets)?,
        })),
        Err(err) => Ok(error_response(&err)),
    }
}

pub async fn check_ticket_status(
    ctx: &AppContext,
    owner_id: &str,
    ticket_id: &str,
) -> AppResult<Value> {
    match ctx.issue_tracker.get_ticket_by_key(owner_id, ticket_id).await {
        Ok(ticket) => Ok(json!({
            "status_code": 200,
            "ticket": serde_json::to_value(ticket)?,
        })),
        Err(err) => Ok(error_response(&err)),
    }
}

pub fn error_response(err: &GatewayError) -> Value {
    json!({
        "status_code": err.status_code,
        "error": err.message,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::config::{AppConfig, JiraSettings};
    use crate::domain::ticket::{CreatedTicket, Ticket, TicketSummary};
    use crate::error::GatewayResult;
    use crate::services::IssueTrackerService;

    struct StubTracker;

    #[async_trait]
    impl IssueTrackerService for StubTracker {
        async fn create_ticket(
            &self,
            request: TicketCreationRequest,
        ) -> GatewayResult<CreatedTicket> {
            if request.category != "Task" {
                return Err(GatewayError::rejected(400, "Failed to create ticket"));
            }
            Ok(CreatedTicket {
                status_code: 201,
                id: "10001".to_string(),
                key: "GEN-23".to_string(),
                self_url: Some("https://tracker/issue/10001".to_string()),
            })
        }

        async fn list_tickets_for_owner(
            &self,
            _owner_id: &str,
        ) -> GatewayResult<Vec<TicketSummary>> {
            Ok(vec![TicketSummary::from(sample_ticket())])
        }

        async fn get_ticket_by_key(
            &self,
            owner_id: &str,
            ticket_id: &str,
        ) -> GatewayResult<Ticket> {
            if ticket_id == "GEN-23" {
                Ok(sample_ticket())
            } else {
                Err(GatewayError::not_found(ticket_id, owner_id))
            }
        }
    }

    fn sample_ticket() -> Ticket {
        Ticket {
            id: "GEN-23".to_string(),
            summary: "Test ticket".to_string(),
            description: "Test desc".to_string(),
            category: "Task".to_string(),
            status: "Open".to_string(),
            resolution: None,
        }
    }

    fn context() -> AppContext {
        let config = AppConfig {
            jira: JiraSettings {
                api_base: "http://localhost".to_string(),
                cloud_id: "cloud-1".to_string(),
                project_key: "GEN".to_string(),
                email: "bot@example.com".to_string(),
                token: "secret-token".to_string(),
                owner_field: "customfield_10088".to_string(),
                timeout: Duration::from_secs(10),
            },
        };
        AppContext::new(config, Arc::new(StubTracker))
    }

    fn request(category: &str) -> TicketCreationRequest {
        TicketCreationRequest {
            owner_id: "user123".to_string(),
            summary: "Test Issue".to_string(),
            description: "Test description".to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn created_ticket_carries_key_without_error() {
        let response = file_complaint(&context(), request("Task")).await.unwrap();
        assert_eq!(response["key"], "GEN-23");
        assert_eq!(response["status_code"], 201);
        assert_eq!(response["self"], "https://tracker/issue/10001");
        assert!(response.get("error").is_none());
    }

    #[tokio::test]
    async fn rejected_creation_carries_error() {
        let response = file_complaint(&context(), request("Bogus")).await.unwrap();
        assert_eq!(response["status_code"], 400);
        assert_eq!(response["error"], "Failed to create ticket");
    }

    #[tokio::test]
    async fn listed_tickets_hold_only_id_and_summary() {
        let response = list_owner_tickets(&context(), "user123").await.unwrap();
        assert_eq!(response["status_code"], 200);
        let first = response["tickets"][0].as_object().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first["ticket_id"], "GEN-23");
        for key in ["description", "issue_type", "status", "resolution"] {
            assert!(!first.contains_key(key));
        }
    }

    #[tokio::test]
    async fn status_check_reports_missing_ticket() {
        let response = check_ticket_status(&context(), "user123", "GEN-999")
            .await
            .unwrap();
        assert_eq!(
            response,
            json!({
                "status_code": 404,
                "error": "Ticket GEN-999 not found for user user123"
            })
        );
    }

    #[tokio::test]
    async fn status_check_returns_ticket_detail() {
        let response = check_ticket_status(&context(), "user123", "GEN-23")
            .await
            .unwrap();
        assert_eq!(response["ticket"]["ticket_id"], "GEN-23");
        assert_eq!(response["ticket"]["description"], "Test desc");
        assert!(response["ticket"]["resolution"].is_null());
    }
}
