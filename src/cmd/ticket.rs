use clap::{Args, Subcommand};
use serde_json::Value;

use crate::context::AppContext;
use crate::domain::ticket::TicketCreationRequest;
use crate::error::AppResult;
use crate::workflow::ticket::{check_ticket_status, file_complaint, list_owner_tickets};

#[derive(Args, Debug, Clone)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TicketCommand {
    /// File a new ticket for a customer.
    Create {
        #[arg(long)]
        user: String,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "Task")]
        issue_type: String,
    },
    /// List a customer's tickets.
    List {
        #[arg(long)]
        user: String,
    },
    /// Show one of a customer's tickets.
    Show {
        #[arg(long)]
        user: String,
        #[arg(long)]
        key: String,
    },
}

pub async fn run(ctx: &AppContext, command: TicketCommand) -> AppResult<Value> {
    match command {
        TicketCommand::Create {
            user,
            summary,
            description,
            issue_type,
        } => {
            let request = TicketCreationRequest {
                owner_id: user,
                summary,
                description,
                category: issue_type,
            };
            file_complaint(ctx, request).await
        }
        TicketCommand::List { user } => list_owner_tickets(ctx, &user).await,
        TicketCommand::Show { user, key } => check_ticket_status(ctx, &user, &key).await,
    }
}
