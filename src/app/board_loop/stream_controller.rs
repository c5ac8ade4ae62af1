use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::Input;

use crate::{
    app::{
        actions::{ActionKind, BoardAction, ResolveRequest},
        board::TicketBoard,
    },
    domain::{
        deadline::normalize,
        ticket::{resolve, ViewState},
        time::to_local_input_value,
    },
    ports::ClockPort,
    ui::tui::{
        handle_input, parse_input, text_edit_request, BoardModel, DeadlineDialog, InputCommand,
        Modal,
    },
};

const ESC_DOUBLE_PRESS_WINDOW_MS: i64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum LoopControl {
    Continue,
    Redraw,
    Dispatch(BoardAction),
    Quit,
}

pub(super) fn handle_stream_event<K>(
    maybe_event: Option<Result<Event, std::io::Error>>,
    model: &mut BoardModel,
    board: &TicketBoard,
    clock: &K,
) -> LoopControl
where
    K: ClockPort + ?Sized,
{
    match maybe_event {
        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return LoopControl::Quit;
            }

            match model.modal.take() {
                Some(modal) => handle_modal_key(modal, key, model, clock),
                None => handle_board_key(key, model, board, clock),
            }
        }
        Some(Ok(Event::Key(_))) => LoopControl::Continue,
        Some(Ok(Event::Resize(_, _))) => LoopControl::Redraw,
        Some(Ok(_)) => LoopControl::Continue,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "input stream failed");

            model.failure_count += 1;
            model.status_line = format!("input stream failed: {err}");
            LoopControl::Redraw
        }
        None => LoopControl::Quit,
    }
}

fn handle_board_key<K>(
    key: KeyEvent,
    model: &mut BoardModel,
    board: &TicketBoard,
    clock: &K,
) -> LoopControl
where
    K: ClockPort + ?Sized,
{
    let cmd = parse_input(key);
    if cmd != InputCommand::EscapePressed {
        model.esc_armed_until = None;
    }

    match cmd {
        InputCommand::Quit => LoopControl::Quit,
        InputCommand::EscapePressed => {
            let now = clock.now();
            if model
                .esc_armed_until
                .is_some_and(|armed_until| now <= armed_until)
            {
                LoopControl::Quit
            } else {
                model.esc_armed_until =
                    Some(now + chrono::Duration::milliseconds(ESC_DOUBLE_PRESS_WINDOW_MS));
                model.status_line = "press Esc again to quit (1.5s)".to_string();
                LoopControl::Redraw
            }
        }
        InputCommand::Refresh => LoopControl::Dispatch(BoardAction::Refresh),
        InputCommand::OpenRaise => {
            model.modal = Some(Modal::Raise);
            LoopControl::Redraw
        }
        InputCommand::OpenDeadline => {
            let now = clock.now();
            let Some(ticket) = model.selected_ticket(board) else {
                return no_selection(model, now);
            };
            if !resolve(ticket, now).can_set_deadline() {
                model
                    .toasts
                    .info("Not allowed", "Resolved tickets cannot take a deadline", now);
                return LoopControl::Redraw;
            }
            model.modal = Some(Modal::Deadline(DeadlineDialog::new(ticket)));
            LoopControl::Redraw
        }
        InputCommand::RequestResolve => {
            let now = clock.now();
            let Some(ticket) = model.selected_ticket(board) else {
                return no_selection(model, now);
            };
            match resolve(ticket, now) {
                state if state.can_mark_resolved() => {
                    model.modal = Some(Modal::ConfirmResolve(ResolveRequest::new(
                        ticket.ticket_no.clone(),
                    )));
                }
                ViewState::Raised => {
                    model
                        .toasts
                        .info("Not allowed", "Set a deadline before resolving", now);
                }
                _ => {
                    model
                        .toasts
                        .info("Not allowed", "Ticket is already resolved", now);
                }
            }
            LoopControl::Redraw
        }
        InputCommand::None => LoopControl::Continue,
        _ => {
            if handle_input(model, board, cmd) {
                LoopControl::Redraw
            } else {
                LoopControl::Continue
            }
        }
    }
}

fn handle_modal_key<K>(
    modal: Modal,
    key: KeyEvent,
    model: &mut BoardModel,
    clock: &K,
) -> LoopControl
where
    K: ClockPort + ?Sized,
{
    match modal {
        Modal::Help => match key.code {
            KeyCode::Char('q') => LoopControl::Quit,
            _ => LoopControl::Redraw,
        },
        Modal::Raise => {
            let control = handle_raise_key(key, model, clock);
            if key.code != KeyCode::Esc {
                model.modal = Some(Modal::Raise);
            }
            control
        }
        Modal::Deadline(mut dialog) => {
            if key.code == KeyCode::Esc {
                return LoopControl::Redraw;
            }
            let control = handle_deadline_key(key, &mut dialog, model, clock);
            model.modal = Some(Modal::Deadline(dialog));
            control
        }
        Modal::ConfirmResolve(request) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                LoopControl::Dispatch(BoardAction::MarkResolved(request.confirm()))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => LoopControl::Redraw,
            _ => {
                model.modal = Some(Modal::ConfirmResolve(request));
                LoopControl::Continue
            }
        },
    }
}

fn handle_raise_key<K>(key: KeyEvent, model: &mut BoardModel, clock: &K) -> LoopControl
where
    K: ClockPort + ?Sized,
{
    let form = &mut model.raise_form;
    match key.code {
        KeyCode::Esc => LoopControl::Redraw,
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.next();
            LoopControl::Redraw
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = form.focus.prev();
            LoopControl::Redraw
        }
        KeyCode::Enter if !form.focus.is_last() => {
            form.focus = form.focus.next();
            LoopControl::Redraw
        }
        KeyCode::Enter => {
            let request = form
                .to_new_ticket(model.attachment_max_bytes)
                .and_then(|ticket| ticket.to_request());
            match request {
                Ok(request) => LoopControl::Dispatch(BoardAction::Raise(request)),
                Err(err) => {
                    model
                        .toasts
                        .error(ActionKind::Raise.failure_title(), err.to_string(), clock.now());
                    LoopControl::Redraw
                }
            }
        }
        _ => match text_edit_request(key) {
            Some(request) => {
                form.input_mut(form.focus).handle(request);
                LoopControl::Redraw
            }
            None => LoopControl::Continue,
        },
    }
}

fn handle_deadline_key<K>(
    key: KeyEvent,
    dialog: &mut DeadlineDialog,
    model: &mut BoardModel,
    clock: &K,
) -> LoopControl
where
    K: ClockPort + ?Sized,
{
    match key.code {
        KeyCode::Enter => save_deadline(dialog, model, clock),
        KeyCode::Tab if dialog.editing_manual => {
            dialog.editing_manual = false;
            LoopControl::Redraw
        }
        _ if dialog.editing_manual => match text_edit_request(key) {
            Some(request) => {
                dialog.manual.handle(request);
                dialog.sync_manual();
                LoopControl::Redraw
            }
            None => LoopControl::Continue,
        },
        KeyCode::Char('m') | KeyCode::Tab => {
            dialog.editing_manual = true;
            if dialog.manual.value().is_empty() && dialog.existing.is_some() {
                dialog.manual = Input::new(to_local_input_value(dialog.existing));
                dialog.sync_manual();
            }
            LoopControl::Redraw
        }
        KeyCode::Char('s') => save_deadline(dialog, model, clock),
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            if dialog.pick_preset(index) {
                LoopControl::Redraw
            } else {
                LoopControl::Continue
            }
        }
        _ => LoopControl::Continue,
    }
}

fn no_selection(model: &mut BoardModel, now: chrono::DateTime<chrono::Utc>) -> LoopControl {
    model.toasts.error("No ticket selected", "Select a ticket first", now);
    LoopControl::Redraw
}

/// The quick preset is anchored here, at save time, not when the dialog opened.
fn save_deadline<K>(dialog: &DeadlineDialog, model: &mut BoardModel, clock: &K) -> LoopControl
where
    K: ClockPort + ?Sized,
{
    let now = clock.now();
    match normalize(&dialog.ticket_no, &dialog.selection, now) {
        Ok(deadline) => LoopControl::Dispatch(BoardAction::SetDeadline(deadline)),
        Err(err) => {
            model
                .toasts
                .error(ActionKind::SetDeadline.failure_title(), err.to_string(), now);
            LoopControl::Redraw
        }
    }
}
