use chrono::{DateTime, Utc};

use crate::{
    app::board::TicketBoard,
    domain::{deadline::NormalizedDeadline, ticket::RaiseTicketRequest, ticket::Ticket},
    error::{TicketError, TicketResult},
    ports::TicketApiPort,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Refresh,
    Raise,
    SetDeadline,
    MarkResolved,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Raise => "raise",
            Self::SetDeadline => "set_deadline",
            Self::MarkResolved => "mark_resolved",
        }
    }

    pub fn success_title(&self) -> &'static str {
        match self {
            Self::Refresh => "Tickets loaded",
            Self::Raise => "Ticket Raised",
            Self::SetDeadline => "Deadline Saved",
            Self::MarkResolved => "Marked Resolved",
        }
    }

    pub fn failure_title(&self) -> &'static str {
        match self {
            Self::Refresh => "Unable to load tickets",
            Self::Raise => "Ticket raise failed",
            Self::SetDeadline => "Deadline update failed",
            Self::MarkResolved => "Resolve failed",
        }
    }

    pub fn in_progress_label(&self) -> &'static str {
        match self {
            Self::Refresh => "refreshing",
            Self::Raise => "raising ticket",
            Self::SetDeadline => "saving deadline",
            Self::MarkResolved => "resolving",
        }
    }
}

/// A resolution the user has been asked about but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    ticket_no: String,
}

impl ResolveRequest {
    pub fn new(ticket_no: impl Into<String>) -> Self {
        Self {
            ticket_no: ticket_no.into(),
        }
    }

    pub fn ticket_no(&self) -> &str {
        &self.ticket_no
    }

    pub fn prompt(&self) -> String {
        format!("Mark this ticket as RESOLVED?\n\nTicket: {}", self.ticket_no)
    }

    pub fn confirm(self) -> ConfirmedResolve {
        ConfirmedResolve {
            ticket_no: self.ticket_no,
        }
    }
}

/// Proof of explicit confirmation; only [`ResolveRequest::confirm`] makes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedResolve {
    ticket_no: String,
}

impl ConfirmedResolve {
    pub fn ticket_no(&self) -> &str {
        &self.ticket_no
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    Refresh,
    Raise(RaiseTicketRequest),
    SetDeadline(NormalizedDeadline),
    MarkResolved(ConfirmedResolve),
}

impl BoardAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Refresh => ActionKind::Refresh,
            Self::Raise(_) => ActionKind::Raise,
            Self::SetDeadline(_) => ActionKind::SetDeadline,
            Self::MarkResolved(_) => ActionKind::MarkResolved,
        }
    }
}

/// Result of one remote round: the mutation (if any) and the listing fetched
/// after it.
#[derive(Debug)]
pub enum ActionOutcome {
    Rejected {
        kind: ActionKind,
        error: TicketError,
    },
    Completed {
        kind: ActionKind,
        listing: TicketResult<Vec<Ticket>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed(usize),
    /// The mutation went through but the follow-up listing failed; the board
    /// still holds the previous collection.
    Stale(TicketError),
}

impl ActionOutcome {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Rejected { kind, .. } | Self::Completed { kind, .. } => *kind,
        }
    }

    pub fn apply(
        self,
        board: &mut TicketBoard,
        now: DateTime<Utc>,
    ) -> TicketResult<RefreshOutcome> {
        match self {
            Self::Rejected { error, .. } => Err(error),
            Self::Completed {
                listing: Ok(tickets),
                ..
            } => {
                let count = tickets.len();
                board.replace_all(tickets, now);
                Ok(RefreshOutcome::Refreshed(count))
            }
            Self::Completed {
                listing: Err(error),
                ..
            } => Ok(RefreshOutcome::Stale(error)),
        }
    }
}

/// Sends the mutation, then re-lists. Nothing is applied locally here; the
/// caller swaps the board from the listing.
pub async fn execute_action<A>(api: &A, action: BoardAction) -> ActionOutcome
where
    A: TicketApiPort + ?Sized,
{
    let kind = action.kind();
    let mutation = match &action {
        BoardAction::Refresh => Ok(()),
        BoardAction::Raise(request) => api.raise_ticket(request).await,
        BoardAction::SetDeadline(deadline) => api.set_deadline(&deadline.submission).await,
        BoardAction::MarkResolved(confirmed) => api.mark_resolved(confirmed.ticket_no()).await,
    };

    if let Err(error) = mutation {
        tracing::warn!(action = kind.as_str(), error = %error, "action rejected");
        return ActionOutcome::Rejected { kind, error };
    }

    let listing = api.list_tickets().await;
    if let Err(error) = &listing {
        tracing::warn!(action = kind.as_str(), error = %error, "ticket listing failed");
    }
    ActionOutcome::Completed { kind, listing }
}
