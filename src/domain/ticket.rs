use serde::Serialize;

/// Input for filing a new ticket on behalf of an end user.
#[derive(Debug, Clone)]
pub struct TicketCreationRequest {
    pub owner_id: String,
    pub summary: String,
    pub description: String,
    pub category: String,
}

/// Tracker acknowledgement of a freshly created ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedTicket {
    pub status_code: u16,
    pub id: String,
    pub key: String,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    #[serde(rename = "ticket_id")]
    pub id: String,
    pub summary: String,
    pub description: String,
    #[serde(rename = "issue_type")]
    pub category: String,
    pub status: String,
    pub resolution: Option<String>,
}

/// List-view projection of a ticket: key and summary only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    #[serde(rename = "ticket_id")]
    pub id: String,
    pub summary: String,
}

impl From<Ticket> for TicketSummary {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            summary: ticket.summary,
        }
    }
}
