use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::JiraSettings;
use crate::domain::ticket::{CreatedTicket, Ticket, TicketCreationRequest, TicketSummary};
use crate::error::{AppError, AppResult, GatewayError, GatewayResult};
use crate::services::IssueTrackerService;

const SEARCH_FIELDS: &str = "summary,description,issuetype,status,resolution";
const LIST_LIMIT: u32 = 100;

pub struct JiraClient {
    http: Client,
    api_base: String,
    cloud_id: String,
    project_key: String,
    owner_field: String,
    auth_header: String,
}

impl JiraClient {
    pub fn new(settings: &JiraSettings) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| AppError::IssueTracker(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_base: settings.api_base.clone(),
            cloud_id: settings.cloud_id.clone(),
            project_key: settings.project_key.clone(),
            owner_field: settings.owner_field.clone(),
            auth_header: Self::auth_header(&settings.email, &settings.token),
        })
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn api_root(&self) -> String {
        format!(
            "{}/ex/jira/{}/rest/api/3",
            self.api_base.trim_end_matches('/'),
            self.cloud_id
        )
    }

    fn issue_endpoint(&self) -> String {
        format!("{}/issue", self.api_root())
    }

    fn search_endpoint(&self) -> String {
        format!("{}/search/jql", self.api_root())
    }

    fn owner_filter(&self, owner_id: &str) -> String {
        format!(
            "project = {} AND {} ~ {}",
            self.project_key,
            jql_literal(&self.owner_field),
            jql_literal(owner_id)
        )
    }

    async fn search(&self, jql: &str, max_results: u32) -> Result<Response, reqwest::Error> {
        let limit = max_results.to_string();
        self.http
            .get(self.search_endpoint())
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .query(&[
                ("jql", jql),
                ("fields", SEARCH_FIELDS),
                ("maxResults", limit.as_str()),
            ])
            .send()
            .await
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn create_ticket(&self, request: TicketCreationRequest) -> GatewayResult<CreatedTicket> {
        const NETWORK: &str = "Network error creating ticket";

        debug!(
            project = %self.project_key,
            owner = %request.owner_id,
            issue_type = %request.category,
            "creating Jira issue"
        );
        let body = JiraCreateIssueRequest::new(&self.project_key, &self.owner_field, &request);

        let response = self
            .http
            .post(self.issue_endpoint())
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "Jira create request failed");
                GatewayError::network(NETWORK)
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            warn!(status = status.as_u16(), "Jira rejected ticket creation");
            return Err(GatewayError::rejected(
                status.as_u16(),
                "Failed to create ticket",
            ));
        }

        let payload: JiraCreateIssueResponse = decode(response, NETWORK).await?;
        debug!(key = %payload.key, "Jira issue created");

        Ok(CreatedTicket {
            status_code: status.as_u16(),
            id: payload.id,
            key: payload.key,
            self_url: payload.self_url,
        })
    }

    async fn list_tickets_for_owner(&self, owner_id: &str) -> GatewayResult<Vec<TicketSummary>> {
        const NETWORK: &str = "Network error retrieving tickets";

        let jql = self.owner_filter(owner_id);
        debug!(%jql, "searching Jira issues for owner");

        let response = self.search(&jql, LIST_LIMIT).await.map_err(|err| {
            warn!(error = %err, "Jira search request failed");
            GatewayError::network(NETWORK)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Jira rejected ticket search");
            return Err(GatewayError::rejected(
                status.as_u16(),
                "Failed to retrieve tickets",
            ));
        }

        let payload: JiraSearchResponse = decode(response, NETWORK).await?;
        Ok(payload
            .issues
            .into_iter()
            .map(|issue| TicketSummary::from(issue.into_ticket()))
            .collect())
    }

    async fn get_ticket_by_key(&self, owner_id: &str, ticket_id: &str) -> GatewayResult<Ticket> {
        const NETWORK: &str = "Network error retrieving ticket";

        let jql = format!(
            "key = {} AND {}",
            jql_literal(ticket_id),
            self.owner_filter(owner_id)
        );
        debug!(%jql, "looking up Jira issue");

        let response = self.search(&jql, 1).await.map_err(|err| {
            warn!(error = %err, "Jira search request failed");
            GatewayError::network(NETWORK)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Jira rejected ticket lookup");
            return Err(GatewayError::rejected(
                status.as_u16(),
                "Failed to retrieve ticket",
            ));
        }

        let payload: JiraSearchResponse = decode(response, NETWORK).await?;
        payload
            .issues
            .into_iter()
            .next()
            .map(JiraIssue::into_ticket)
            .ok_or_else(|| GatewayError::not_found(ticket_id, owner_id))
    }
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    network_message: &str,
) -> GatewayResult<T> {
    response.json::<T>().await.map_err(|err| {
        warn!(error = %err, "failed to read Jira response");
        if err.is_decode() {
            GatewayError::invalid_response()
        } else {
            GatewayError::network(network_message)
        }
    })
}

/// Quotes `value` as a JQL string literal.
fn jql_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Concatenates the text runs of an Atlassian document in order.
///
/// Only the direct children of top-level blocks are visited, and only
/// nodes typed `text` contribute. Anything that is not a document object
/// flattens to an empty string.
fn flatten_description(document: &Value) -> String {
    let Some(blocks) = document.get("content").and_then(Value::as_array) else {
        return String::new();
    };

    blocks
        .iter()
        .filter_map(|block| block.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|node| node.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|node| node.get("text").and_then(Value::as_str))
        .collect()
}

#[derive(Serialize)]
struct JiraCreateIssueRequest {
    fields: JiraCreateIssueFields,
}

impl JiraCreateIssueRequest {
    fn new(project_key: &str, owner_field: &str, request: &TicketCreationRequest) -> Self {
        let mut custom_fields = BTreeMap::new();
        custom_fields.insert(owner_field.to_string(), request.owner_id.clone());

        Self {
            fields: JiraCreateIssueFields {
                project: JiraProject {
                    key: project_key.to_string(),
                },
                summary: request.summary.clone(),
                description: JiraDescription::paragraph(&request.description),
                issuetype: JiraIssueType {
                    name: request.category.clone(),
                },
                custom_fields,
            },
        }
    }
}

#[derive(Serialize)]
struct JiraCreateIssueFields {
    project: JiraProject,
    summary: String,
    description: JiraDescription,
    issuetype: JiraIssueType,
    #[serde(flatten)]
    custom_fields: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct JiraProject {
    key: String,
}

#[derive(Serialize)]
struct JiraIssueType {
    name: String,
}

#[derive(Serialize)]
struct JiraDescription {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDescription {
    fn paragraph(text: &str) -> Self {
        Self {
            doc_type: "doc",
            version: 1,
            content: vec![JiraDocNode {
                node_type: "paragraph",
                content: vec![JiraDocText {
                    text_type: "text",
                    text: text.to_string(),
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraDocText>,
}

#[derive(Serialize)]
struct JiraDocText {
    #[serde(rename = "type")]
    text_type: &'static str,
    text: String,
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    id: String,
    key: String,
    #[serde(rename = "self")]
    self_url: Option<String>,
}

#[derive(Deserialize)]
struct JiraSearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Deserialize)]
struct JiraIssue {
    #[serde(default)]
    key: String,
    #[serde(default)]
    fields: JiraIssueFields,
}

#[derive(Deserialize, Default)]
struct JiraIssueFields {
    summary: Option<String>,
    description: Option<Value>,
    issuetype: Option<JiraNamed>,
    status: Option<JiraNamed>,
    resolution: Option<JiraNamed>,
}

#[derive(Deserialize)]
struct JiraNamed {
    name: Option<String>,
}

impl JiraIssue {
    fn into_ticket(self) -> Ticket {
        let fields = self.fields;
        let name_of = |named: Option<JiraNamed>| named.and_then(|n| n.name);

        Ticket {
            id: self.key,
            summary: fields.summary.unwrap_or_default(),
            description: fields
                .description
                .as_ref()
                .map(flatten_description)
                .unwrap_or_default(),
            category: name_of(fields.issuetype).unwrap_or_default(),
            status: name_of(fields.status).unwrap_or_default(),
            resolution: name_of(fields.resolution),
        }
    }
}
