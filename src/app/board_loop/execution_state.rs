use crate::app::actions::{ActionKind, BoardAction};

/// Single-flight gate for remote work started from the board.
///
/// Refreshes asked for while something is in flight are remembered and run
/// once afterwards; mutations are refused instead of queued.
#[derive(Debug, Default)]
pub(super) struct ActionExecutionState {
    pending: Option<BoardAction>,
    in_flight: Option<ActionKind>,
    queued_refresh: bool,
}

impl ActionExecutionState {
    pub(super) fn request_refresh(&mut self) -> bool {
        if self.in_flight.is_some() {
            self.queued_refresh = true;
            return false;
        }

        if self.pending.is_some() {
            return false;
        }

        self.pending = Some(BoardAction::Refresh);
        true
    }

    pub(super) fn submit(&mut self, action: BoardAction) -> bool {
        if matches!(action, BoardAction::Refresh) {
            return self.request_refresh();
        }

        if self.in_flight.is_some() || self.pending.is_some() {
            return false;
        }

        self.pending = Some(action);
        true
    }

    pub(super) fn start_next(&mut self) -> Option<BoardAction> {
        if self.in_flight.is_some() {
            return None;
        }

        let action = self.pending.take()?;
        self.in_flight = Some(action.kind());
        Some(action)
    }

    pub(super) fn finish_and_take_next_request(&mut self) -> bool {
        self.in_flight = None;

        if self.queued_refresh {
            self.queued_refresh = false;
            if self.pending.is_none() {
                self.pending = Some(BoardAction::Refresh);
            }
            return true;
        }

        false
    }

    pub(super) fn in_flight(&self) -> Option<ActionKind> {
        self.in_flight
    }

    pub(super) fn queued_refresh(&self) -> bool {
        self.queued_refresh
    }
}
