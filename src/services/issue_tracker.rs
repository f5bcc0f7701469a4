use async_trait::async_trait;

use crate::domain::ticket::{CreatedTicket, Ticket, TicketCreationRequest, TicketSummary};
use crate::error::GatewayResult;

/// Tracker operations scoped to the configured project.
///
/// Failures come back as `GatewayError` values; nothing here retries.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn create_ticket(&self, request: TicketCreationRequest) -> GatewayResult<CreatedTicket>;

    /// Tickets whose owner field contains `owner_id`, in tracker order.
    async fn list_tickets_for_owner(&self, owner_id: &str) -> GatewayResult<Vec<TicketSummary>>;

    /// A ticket owned by someone else is reported as not found.
    async fn get_ticket_by_key(&self, owner_id: &str, ticket_id: &str) -> GatewayResult<Ticket>;
}
