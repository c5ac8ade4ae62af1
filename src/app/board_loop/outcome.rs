use crate::{
    app::{
        actions::{ActionKind, ActionOutcome, RefreshOutcome},
        controller::TicketListController,
    },
    error::TicketError,
    ports::{ClockPort, TicketApiPort},
    ui::tui::{BoardModel, Modal},
};

pub(super) fn apply_action_outcome<A, K>(
    outcome: ActionOutcome,
    controller: &mut TicketListController<'_, A, K>,
    model: &mut BoardModel,
) where
    A: TicketApiPort + ?Sized,
    K: ClockPort + ?Sized,
{
    let kind = outcome.kind();
    let now = controller.clock().now();

    match controller.apply(outcome) {
        Ok(RefreshOutcome::Refreshed(count)) => {
            model.status_line = format!("ok (tickets={count})");
            model.last_success_at = Some(now);
            finish_mutation(kind, model, now);
        }
        Ok(RefreshOutcome::Stale(err)) if kind == ActionKind::Refresh => {
            record_failure(kind, &err, model, now);
        }
        Ok(RefreshOutcome::Stale(err)) => {
            finish_mutation(kind, model, now);
            record_failure(ActionKind::Refresh, &err, model, now);
        }
        Err(err) => record_failure(kind, &err, model, now),
    }

    let visible_len = model.visible_tickets(controller.board()).len();
    model.clamp_selection(visible_len);
}

fn finish_mutation(kind: ActionKind, model: &mut BoardModel, now: chrono::DateTime<chrono::Utc>) {
    match kind {
        ActionKind::Refresh => return,
        ActionKind::Raise => {
            model.raise_form.reset();
            if matches!(model.modal, Some(Modal::Raise)) {
                model.close_modal();
            }
        }
        ActionKind::SetDeadline => {
            if matches!(model.modal, Some(Modal::Deadline(_))) {
                model.close_modal();
            }
        }
        ActionKind::MarkResolved => {}
    }
    model.toasts.success(kind.success_title(), "", now);
}

fn record_failure(
    kind: ActionKind,
    err: &TicketError,
    model: &mut BoardModel,
    now: chrono::DateTime<chrono::Utc>,
) {
    model.failure_count += 1;
    model.status_line = format!("{} failed: {err}", kind.as_str());
    model.toasts.error(kind.failure_title(), err.to_string(), now);
}
