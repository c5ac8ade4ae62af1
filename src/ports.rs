use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    domain::{
        deadline::DeadlineSubmission,
        ticket::{RaiseTicketRequest, Ticket},
    },
    error::TicketResult,
};

/// The remote collaborator that owns ticket persistence.
#[async_trait]
pub trait TicketApiPort: Send + Sync {
    async fn list_tickets(&self) -> TicketResult<Vec<Ticket>>;
    async fn raise_ticket(&self, request: &RaiseTicketRequest) -> TicketResult<()>;
    async fn set_deadline(&self, submission: &DeadlineSubmission) -> TicketResult<()>;
    async fn mark_resolved(&self, ticket_no: &str) -> TicketResult<()>;
}

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
