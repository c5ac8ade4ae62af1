use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::InputRequest;

use crate::{
    app::board::TicketBoard,
    domain::filter::{cycle_option, FilterField},
};

use super::model::BoardModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    ToggleHelp,
    Refresh,
    SwitchSection,
    CycleFilter(FilterField),
    ClearFilters,
    OpenRaise,
    OpenDeadline,
    RequestResolve,
    DismissToast,
    EscapePressed,
    Quit,
    None,
}

/// Board-level keys; dialogs read their own keys.
pub fn parse_input(key: KeyEvent) -> InputCommand {
    match key.code {
        KeyCode::Char('q') => InputCommand::Quit,
        KeyCode::Char('r') => InputCommand::Refresh,
        KeyCode::Char('?') => InputCommand::ToggleHelp,
        KeyCode::Tab | KeyCode::BackTab => InputCommand::SwitchSection,
        KeyCode::Char('f') => InputCommand::CycleFilter(FilterField::RaisedFor),
        KeyCode::Char('p') => InputCommand::CycleFilter(FilterField::ConcernedPerson),
        KeyCode::Char('c') => InputCommand::ClearFilters,
        KeyCode::Char('n') => InputCommand::OpenRaise,
        KeyCode::Char('d') => InputCommand::OpenDeadline,
        KeyCode::Char('x') => InputCommand::RequestResolve,
        KeyCode::Char('t') => InputCommand::DismissToast,
        KeyCode::Esc => InputCommand::EscapePressed,
        KeyCode::Up | KeyCode::Char('k') => InputCommand::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => InputCommand::ScrollDown,
        KeyCode::PageUp => InputCommand::PageUp,
        KeyCode::PageDown => InputCommand::PageDown,
        KeyCode::Home | KeyCode::Char('g') => InputCommand::JumpTop,
        KeyCode::End | KeyCode::Char('G') => InputCommand::JumpBottom,
        _ => InputCommand::None,
    }
}

/// Applies commands that only touch local view state. Returns whether the
/// command was consumed.
pub fn handle_input(model: &mut BoardModel, board: &TicketBoard, command: InputCommand) -> bool {
    let visible_len = model.visible_tickets(board).len();

    match command {
        InputCommand::ToggleHelp => {
            model.modal = match model.modal {
                Some(super::model::Modal::Help) => None,
                _ => Some(super::model::Modal::Help),
            };
        }
        InputCommand::SwitchSection => model.switch_section(),
        InputCommand::ScrollUp => {
            model.set_selected(model.selected().saturating_sub(1));
        }
        InputCommand::ScrollDown => {
            if visible_len > 0 {
                model.set_selected((model.selected() + 1).min(visible_len - 1));
            }
        }
        InputCommand::PageUp => {
            model.set_selected(model.selected().saturating_sub(model.page()));
        }
        InputCommand::PageDown => {
            if visible_len > 0 {
                model.set_selected((model.selected() + model.page()).min(visible_len - 1));
            }
        }
        InputCommand::JumpTop => model.set_selected(0),
        InputCommand::JumpBottom => model.set_selected(visible_len.saturating_sub(1)),
        InputCommand::CycleFilter(field) => {
            let options = board.filter_options(model.active_section);
            let next = cycle_option(options.get(field), model.filter().get(field));
            model.filter_mut().set(field, next);
            model.set_selected(0);
            model.list_offset = 0;
        }
        InputCommand::ClearFilters => {
            model.filter_mut().clear();
            model.set_selected(0);
            model.list_offset = 0;
        }
        InputCommand::DismissToast => {
            model.toasts.dismiss_latest();
        }
        _ => return false,
    }

    let visible_len = model.visible_tickets(board).len();
    model.clamp_selection(visible_len);
    true
}

/// Maps editing keys onto a single-line text input.
pub fn text_edit_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char(c) if !ctrl => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}
