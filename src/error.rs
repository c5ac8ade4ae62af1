use thiserror::Error;

pub const NON_JSON_RESPONSE_MESSAGE: &str =
    "Non-JSON response from server. Check Web App deployment + permissions.";

/// Failure surfaced by any ticket operation.
///
/// Validation failures never reach the network; the remaining kinds come from
/// the remote collaborator call and always leave local state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("unexpected response: {0}")]
    Protocol(String),

    #[error("{0}")]
    Remote(String),
}

impl TicketError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type TicketResult<T> = Result<T, TicketError>;
