use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// The tracker answered with a status outside the accepted set.
    RemoteRejected,
    /// No response at all: timeout, refused connection, DNS.
    NetworkError,
    /// The key + owner filter matched nothing.
    NotFound,
    /// A success status whose body could not be decoded.
    InvalidResponse,
}

/// Per-call failure returned as a value by the ticket gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status_code})")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub status_code: u16,
    pub message: String,
}

impl GatewayError {
    pub fn rejected(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::RemoteRejected,
            status_code,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::NetworkError,
            status_code: 500,
            message: message.into(),
        }
    }

    pub fn not_found(ticket_id: &str, owner_id: &str) -> Self {
        Self {
            kind: GatewayErrorKind::NotFound,
            status_code: 404,
            message: format!("Ticket {ticket_id} not found for user {owner_id}"),
        }
    }

    pub fn invalid_response() -> Self {
        Self {
            kind: GatewayErrorKind::InvalidResponse,
            status_code: 502,
            message: "Invalid response from ticket tracker".to_string(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
