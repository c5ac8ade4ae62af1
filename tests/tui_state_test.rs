use chrono::{TimeZone, Utc};
use serde_json::json;

use ticket_desk::{
    app::board::{Section, TicketBoard},
    domain::{ticket::Ticket, toast::ToastQueue},
    infra::attachment::MAX_ATTACHMENT_BYTES,
    ui::tui::{handle_input, BoardModel, InputCommand, Modal},
};

fn ticket(no: &str, status: &str) -> Ticket {
    serde_json::from_value(json!({
        "ticketNo": no,
        "raisedFor": "Payroll",
        "concernedPerson": "Asha",
        "issue": "issue",
        "status": status,
    }))
    .unwrap()
}

fn board(live: usize, resolved: usize) -> TicketBoard {
    let mut tickets = (0..live)
        .map(|index| ticket(&format!("L-{index}"), "Open"))
        .collect::<Vec<_>>();
    tickets.extend((0..resolved).map(|index| ticket(&format!("R-{index}"), "Resolved")));
    let mut board = TicketBoard::new();
    board.replace_all(tickets, Utc.with_ymd_and_hms(2025, 1, 8, 9, 0, 0).unwrap());
    board
}

fn model() -> BoardModel {
    BoardModel::new(ToastQueue::default(), MAX_ATTACHMENT_BYTES)
}

#[test]
fn navigation_stays_within_visible_rows() {
    let board = board(3, 1);
    let mut model = model();

    handle_input(&mut model, &board, InputCommand::ScrollUp);
    assert_eq!(model.selected(), 0);

    for _ in 0..5 {
        handle_input(&mut model, &board, InputCommand::ScrollDown);
    }
    assert_eq!(model.selected(), 2);
    assert_eq!(model.selected_ticket(&board).unwrap().ticket_no, "L-2");

    handle_input(&mut model, &board, InputCommand::JumpTop);
    assert_eq!(model.selected(), 0);
    handle_input(&mut model, &board, InputCommand::JumpBottom);
    assert_eq!(model.selected(), 2);
}

#[test]
fn each_section_remembers_its_selection() {
    let board = board(3, 2);
    let mut model = model();

    handle_input(&mut model, &board, InputCommand::JumpBottom);
    handle_input(&mut model, &board, InputCommand::SwitchSection);
    assert_eq!(model.active_section, Section::Resolved);
    assert_eq!(model.selected(), 0);
    assert_eq!(model.selected_ticket(&board).unwrap().ticket_no, "R-0");

    handle_input(&mut model, &board, InputCommand::SwitchSection);
    assert_eq!(model.selected(), 2);
}

#[test]
fn selection_is_clamped_when_board_shrinks() {
    let mut model = model();
    let big = board(5, 0);
    handle_input(&mut model, &big, InputCommand::JumpBottom);
    assert_eq!(model.selected(), 4);

    let small = board(2, 0);
    handle_input(&mut model, &small, InputCommand::ScrollDown);
    assert_eq!(model.selected(), 1);
}

#[test]
fn help_toggles_and_remote_commands_are_not_consumed() {
    let board = board(1, 0);
    let mut model = model();

    assert!(handle_input(&mut model, &board, InputCommand::ToggleHelp));
    assert!(matches!(model.modal, Some(Modal::Help)));
    assert!(handle_input(&mut model, &board, InputCommand::ToggleHelp));
    assert!(model.modal.is_none());

    assert!(!handle_input(&mut model, &board, InputCommand::Refresh));
    assert!(!handle_input(&mut model, &board, InputCommand::RequestResolve));
}
