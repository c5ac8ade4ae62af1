use chrono::{DateTime, Utc};
use ratatui::{
    layout::Constraint,
    style::{Color, Style},
    text::Span,
    widgets::{Cell, Row},
};

use crate::{
    app::board::{Section, TicketBoard},
    domain::{
        deadline::QUICK_PRESETS,
        filter::FilterField,
        ticket::{Ticket, TicketView, ViewState},
        time::format_absolute,
        toast::{Toast, ToastKind},
    },
};

use super::model::{BoardModel, DeadlineDialog};

pub(crate) fn list_constraints(section: Section) -> Vec<Constraint> {
    match section {
        Section::Live => vec![
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(12),
            Constraint::Length(9),
            Constraint::Length(18),
            Constraint::Length(10),
        ],
        Section::Resolved => vec![
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(12),
            Constraint::Length(18),
            Constraint::Length(18),
        ],
    }
}

pub(crate) fn list_header(section: Section) -> Row<'static> {
    match section {
        Section::Live => Row::new(vec![
            "Ticket", "Raised On", "Raised For", "Concerned", "Issue", "State", "Deadline",
            "Remaining",
        ]),
        Section::Resolved => Row::new(vec![
            "Ticket",
            "Raised On",
            "Raised For",
            "Concerned",
            "Issue",
            "Deadline",
            "Resolved At",
        ]),
    }
}

pub(crate) fn empty_row(section: Section, filtered: bool) -> Row<'static> {
    let message = match (section, filtered) {
        (_, true) => "No tickets match the filters",
        (Section::Live, false) => "No live tickets",
        (Section::Resolved, false) => "No resolved tickets",
    };
    let width = list_constraints(section).len();
    let mut cells = vec![Cell::from("-"); width];
    cells[4] = Cell::from(message);
    Row::new(cells)
}

pub(crate) fn ticket_row(view: &TicketView<'_>, section: Section) -> Row<'static> {
    let ticket = view.ticket;
    let mut cells = vec![
        Cell::from(ticket.ticket_no.clone()),
        Cell::from(raised_on_text(ticket)),
        Cell::from(ticket.raised_for.clone()),
        Cell::from(ticket.concerned_person.clone()),
        Cell::from(truncate_tail(&sanitize_single_line(&ticket.issue), 120)),
    ];

    match section {
        Section::Live => {
            cells.push(Cell::from(Span::styled(
                view.state.label(),
                state_style(view.state),
            )));
            cells.push(Cell::from(format_absolute(ticket.deadline_at)));
            cells.push(Cell::from(Span::styled(
                view.remaining.clone(),
                state_style(view.state),
            )));
        }
        Section::Resolved => {
            cells.push(Cell::from(format_absolute(ticket.deadline_at)));
            cells.push(Cell::from(resolved_at_text(ticket)));
        }
    }

    Row::new(cells)
}

pub(crate) fn state_style(state: ViewState) -> Style {
    match state {
        ViewState::Raised => Style::default().fg(Color::Green),
        ViewState::Running => Style::default().fg(Color::Yellow),
        ViewState::Overdue => Style::default().fg(Color::Red),
        ViewState::Resolved => Style::default().fg(Color::LightGreen),
    }
}

pub(crate) fn toast_style(kind: ToastKind) -> Style {
    match kind {
        ToastKind::Success => Style::default().fg(Color::Green),
        ToastKind::Error => Style::default().fg(Color::Red),
        ToastKind::Info => Style::default().fg(Color::Cyan),
    }
}

/// Server-side formatted text wins; otherwise the instant is formatted locally.
pub(crate) fn raised_on_text(ticket: &Ticket) -> String {
    ticket
        .raised_on_formatted
        .clone()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| format_absolute(ticket.raised_on))
}

pub(crate) fn resolved_at_text(ticket: &Ticket) -> String {
    ticket
        .resolved_at_formatted
        .clone()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| format_absolute(ticket.resolved_at))
}

pub(crate) fn build_status_line(
    model: &BoardModel,
    board: &TicketBoard,
    now: DateTime<Utc>,
) -> String {
    let partition = board.partition();
    let counts = format!(
        "live={} resolved={}",
        partition.live.len(),
        partition.resolved.len()
    );

    if let Some(kind) = model.busy {
        let elapsed_millis = model
            .busy_since
            .map(|started| (now - started).num_milliseconds().max(0))
            .unwrap_or(0);
        let refresh = if model.queued_refresh {
            "queued"
        } else {
            "none"
        };
        return format!(
            "{} {} t={}s refresh={refresh} {counts} fail={}",
            spinner_frame(elapsed_millis),
            kind.in_progress_label(),
            elapsed_millis / 1000,
            model.failure_count
        );
    }

    if is_error_status(&model.status_line) {
        let detail = truncate_tail(&sanitize_single_line(&model.status_line), 48);
        return format!("! {detail} {counts} fail={}", model.failure_count);
    }

    let (prefix, status) = if is_quit_armed_status(&model.status_line) {
        (">", "quit armed")
    } else {
        ("+", "ready")
    };
    format!(
        "{prefix} {status} {counts} updated={} fail={}",
        format_compact_status_time(model.last_success_at),
        model.failure_count
    )
}

pub(crate) fn build_filter_line(model: &BoardModel) -> String {
    let filter = model.filter();
    FilterField::ALL
        .iter()
        .map(|field| format!("{}: {}", field.label(), filter.get(*field).unwrap_or("All")))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub(crate) fn build_detail_lines(
    ticket: Option<&Ticket>,
    now: DateTime<Utc>,
    max_width: usize,
) -> [String; 2] {
    let Some(ticket) = ticket else {
        return ["no selection".to_string(), "-".to_string()];
    };

    let view = TicketView::new(ticket, now);
    let mut summary = format!(
        "{} | {} | {} -> {} | {}",
        ticket.ticket_no,
        view.state.label(),
        ticket.raised_for,
        ticket.concerned_person,
        sanitize_single_line(&ticket.issue)
    );
    if let Some(raised_by) = ticket.raised_by.as_deref() {
        summary.push_str(&format!(" | by {raised_by}"));
    }

    let second = match (view.state, ticket.attachment_url.as_deref()) {
        (ViewState::Resolved, attachment) => {
            with_attachment(format!("resolved {}", resolved_at_text(ticket)), attachment)
        }
        (ViewState::Raised, attachment) => with_attachment("no deadline".to_string(), attachment),
        (_, attachment) => with_attachment(
            format!(
                "deadline {} ({} left)",
                format_absolute(ticket.deadline_at),
                view.remaining
            ),
            attachment,
        ),
    };

    [
        truncate_tail(&summary, max_width),
        truncate_tail(&second, max_width),
    ]
}

fn with_attachment(line: String, attachment: Option<&str>) -> String {
    match attachment {
        Some(url) => format!("{line} | {url}"),
        None => line,
    }
}

pub(crate) fn build_keys_line(section: Section) -> String {
    match section {
        Section::Live => {
            "q quit | r refresh | Tab section | f/p filter | c clear | n raise | d deadline | x resolve | ? help"
                .to_string()
        }
        Section::Resolved => {
            "q quit | r refresh | Tab section | f/p filter | c clear | n raise | ? help".to_string()
        }
    }
}

pub(crate) fn toast_line(toast: &Toast, max_width: usize) -> String {
    let line = if toast.message.trim().is_empty() {
        toast.title.clone()
    } else {
        format!(
            "{}: {}",
            toast.title,
            sanitize_single_line(&toast.message)
        )
    };
    truncate_tail(&line, max_width)
}

pub(crate) fn deadline_dialog_lines(dialog: &DeadlineDialog) -> Vec<String> {
    let mut lines = vec![format!("Ticket: {}", dialog.ticket_no)];
    if dialog.existing.is_some() {
        lines.push(format!("Current: {}", format_absolute(dialog.existing)));
    }
    lines.push(String::new());

    let picked = dialog.selection.quick_minutes();
    for (index, preset) in QUICK_PRESETS.iter().enumerate() {
        let marker = if picked == Some(preset.minutes) {
            "(*)"
        } else {
            "( )"
        };
        lines.push(format!("{marker} {}: {}", index + 1, preset.label));
    }
    lines
}

pub(crate) fn truncate_tail(raw: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let char_count = raw.chars().count();
    if char_count <= max_chars {
        return raw.to_string();
    }

    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }

    let mut clipped = raw.chars().take(max_chars - 3).collect::<String>();
    clipped.push_str("...");
    clipped
}

fn sanitize_single_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_compact_status_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|d| {
        d.with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string()
    })
    .unwrap_or_else(|| "-".to_string())
}

fn is_quit_armed_status(status: &str) -> bool {
    status.starts_with("press Esc again")
}

fn is_error_status(status: &str) -> bool {
    let lower = status.to_ascii_lowercase();
    lower.contains("failed") || lower.contains("error")
}

fn spinner_frame(elapsed_millis: i64) -> &'static str {
    const FRAME_INTERVAL_MS: i64 = 120;
    const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

    let frame_step = elapsed_millis.div_euclid(FRAME_INTERVAL_MS);
    FRAMES[frame_step.rem_euclid(FRAMES.len() as i64) as usize]
}
