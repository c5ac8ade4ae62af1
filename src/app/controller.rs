use std::time::Duration;

use tokio::sync::watch;

use crate::{
    app::{
        actions::{execute_action, ActionOutcome, BoardAction, ConfirmedResolve, RefreshOutcome},
        board::{Partition, TicketBoard},
        ticker::TickTask,
    },
    domain::{
        deadline::{normalize, DeadlineSelection},
        ticket::{NewTicket, Ticket, TicketView},
    },
    error::{TicketError, TicketResult},
    ports::{ClockPort, TicketApiPort},
};

/// Owns the cached ticket collection and the shared tick.
///
/// Every mutation is fire-and-confirm: the remote call goes out, and the
/// board only changes when the listing fetched afterwards arrives.
pub struct TicketListController<'a, A: ?Sized, K: ?Sized> {
    api: &'a A,
    clock: &'a K,
    board: TicketBoard,
    ticker: Option<TickTask>,
}

impl<'a, A, K> TicketListController<'a, A, K>
where
    A: TicketApiPort + ?Sized,
    K: ClockPort + ?Sized,
{
    pub fn new(api: &'a A, clock: &'a K) -> Self {
        Self {
            api,
            clock,
            board: TicketBoard::new(),
            ticker: None,
        }
    }

    pub fn api(&self) -> &'a A {
        self.api
    }

    pub fn clock(&self) -> &'a K {
        self.clock
    }

    pub fn board(&self) -> &TicketBoard {
        &self.board
    }

    pub fn tickets(&self) -> &[Ticket] {
        self.board.tickets()
    }

    pub fn partition(&self) -> Partition<'_> {
        self.board.partition()
    }

    pub fn views(&self) -> Vec<TicketView<'_>> {
        self.board.views(self.clock.now())
    }

    /// Replaces the collection; on failure the previous one stays in place.
    pub async fn refresh(&mut self) -> TicketResult<usize> {
        match self.run(BoardAction::Refresh).await? {
            RefreshOutcome::Refreshed(count) => Ok(count),
            RefreshOutcome::Stale(err) => Err(err),
        }
    }

    pub async fn raise(&mut self, ticket: &NewTicket) -> TicketResult<RefreshOutcome> {
        let request = ticket.to_request()?;
        self.run(BoardAction::Raise(request)).await
    }

    /// Normalizes against the clock at call time, so quick presets count
    /// from the moment of submission.
    pub async fn set_deadline(
        &mut self,
        ticket_no: &str,
        selection: &DeadlineSelection,
    ) -> TicketResult<RefreshOutcome> {
        self.ensure_not_resolved(ticket_no)?;
        let deadline = normalize(ticket_no, selection, self.clock.now())?;
        self.run(BoardAction::SetDeadline(deadline)).await
    }

    pub async fn mark_resolved(
        &mut self,
        confirmed: ConfirmedResolve,
    ) -> TicketResult<RefreshOutcome> {
        self.ensure_not_resolved(confirmed.ticket_no())?;
        self.run(BoardAction::MarkResolved(confirmed)).await
    }

    pub async fn run(&mut self, action: BoardAction) -> TicketResult<RefreshOutcome> {
        let outcome = execute_action(self.api, action).await;
        self.apply(outcome)
    }

    /// Applies an outcome produced elsewhere, e.g. by a future the board loop
    /// polled while still drawing.
    pub fn apply(&mut self, outcome: ActionOutcome) -> TicketResult<RefreshOutcome> {
        let kind = outcome.kind();
        let applied = outcome.apply(&mut self.board, self.clock.now());
        match &applied {
            Ok(RefreshOutcome::Refreshed(count)) => {
                tracing::info!(action = kind.as_str(), tickets = count, "board refreshed");
            }
            Ok(RefreshOutcome::Stale(err)) => {
                tracing::warn!(action = kind.as_str(), error = %err, "board left stale");
            }
            Err(err) => {
                tracing::warn!(action = kind.as_str(), error = %err, "action failed");
            }
        }
        applied
    }

    pub fn start_ticking(&mut self, period: Duration) -> watch::Receiver<u64> {
        self.ticker
            .get_or_insert_with(|| TickTask::spawn(period))
            .subscribe()
    }

    pub fn stop_ticking(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    fn ensure_not_resolved(&self, ticket_no: &str) -> TicketResult<()> {
        match self.board.find(ticket_no) {
            Some(ticket) if ticket.is_resolved() => Err(TicketError::validation(format!(
                "Ticket {} is already resolved",
                ticket.ticket_no
            ))),
            _ => Ok(()),
        }
    }
}
