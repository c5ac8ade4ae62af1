use std::io::{stdout, Stdout};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tui_input::Input;

use crate::{
    app::{
        actions::ResolveRequest,
        board::{Section, TicketBoard},
    },
    domain::ticket::TicketView,
};

use super::{
    layout::{centered_rect, shrink_by_border, ui_layout},
    model::{BoardModel, DeadlineDialog, Modal, RaiseField, RaiseForm},
    presentation::{
        build_detail_lines, build_filter_line, build_keys_line, build_status_line,
        deadline_dialog_lines, empty_row, list_constraints, list_header, ticket_row, toast_line,
        toast_style,
    },
};

pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalUi {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(out);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn draw(
        &mut self,
        model: &mut BoardModel,
        board: &TicketBoard,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.terminal
            .draw(|frame| render(frame, model, board, now))?;
        Ok(())
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

fn render(frame: &mut Frame<'_>, model: &mut BoardModel, board: &TicketBoard, now: DateTime<Utc>) {
    let layout = ui_layout(frame.area());

    let status = Paragraph::new(Line::from(build_status_line(model, board, now)))
        .block(Block::default().borders(Borders::ALL).title("Stat"));
    frame.render_widget(status, layout.status);

    let tab_titles = [Section::Live, Section::Resolved]
        .into_iter()
        .map(|section| Line::from(section.title()))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(tab_titles)
        .select(model.active_section.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(build_filter_line(model)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, layout.tabs);

    render_ticket_list(frame, model, board, now, layout.list);
    render_toasts(frame, model, layout.toasts);

    let detail_width = shrink_by_border(layout.detail).width as usize;
    let [summary, second] = build_detail_lines(model.selected_ticket(board), now, detail_width);
    let detail = Paragraph::new(vec![Line::from(summary), Line::from(second)])
        .block(Block::default().borders(Borders::ALL).title("Sel"));
    frame.render_widget(detail, layout.detail);

    let keys = Paragraph::new(Line::from(build_keys_line(model.active_section)))
        .block(Block::default().borders(Borders::ALL).title("Keys"));
    frame.render_widget(keys, layout.keys);

    match &model.modal {
        Some(Modal::Help) => render_help_overlay(frame),
        Some(Modal::Raise) => render_raise_form(frame, &model.raise_form),
        Some(Modal::Deadline(dialog)) => render_deadline_dialog(frame, dialog),
        Some(Modal::ConfirmResolve(request)) => render_confirm(frame, request),
        None => {}
    }
}

fn render_ticket_list(
    frame: &mut Frame<'_>,
    model: &mut BoardModel,
    board: &TicketBoard,
    now: DateTime<Utc>,
    area: Rect,
) {
    let section = model.active_section;
    let inner = shrink_by_border(area);
    model.page_size = (inner.height as usize).saturating_sub(1).max(1);

    let visible = model.visible_tickets(board);
    let rows = if visible.is_empty() {
        vec![empty_row(section, !model.filter().is_empty())]
    } else {
        visible
            .iter()
            .map(|ticket| ticket_row(&TicketView::new(ticket, now), section))
            .collect()
    };

    let title = format!("{} ({})", section.title(), visible.len());
    let table = Table::new(rows, list_constraints(section))
        .header(list_header(section).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    model.clamp_selection(visible.len());
    let mut state = TableState::default().with_offset(model.list_offset);
    if !visible.is_empty() {
        state.select(Some(model.selected()));
    }
    frame.render_stateful_widget(table, area, &mut state);
    model.list_offset = if visible.is_empty() {
        0
    } else {
        state.offset()
    };
}

fn render_toasts(frame: &mut Frame<'_>, model: &BoardModel, area: Rect) {
    let width = shrink_by_border(area).width as usize;
    let items = model
        .toasts
        .iter()
        .map(|toast| {
            ListItem::new(Line::from(Span::styled(
                toast_line(toast, width),
                toast_style(toast.kind),
            )))
        })
        .collect::<Vec<_>>();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Toasts"));
    frame.render_widget(list, area);
}

fn render_help_overlay(frame: &mut Frame<'_>) {
    let area = centered_rect(frame.area(), 80, 70);
    frame.render_widget(Clear, area);

    let help = Paragraph::new(vec![
        Line::from(vec![Span::styled(
            "Keyboard",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("q: quit immediately, Esc twice within 1.5s: quit"),
        Line::from("Tab: switch Live and Resolved"),
        Line::from("r: refresh, ?: toggle help, t: dismiss newest toast"),
        Line::from("f / p: cycle Raised For / Concerned Person filter, c: clear filters"),
        Line::from("n: raise a ticket (Tab moves between fields, Enter on last field submits)"),
        Line::from("d: set deadline (1-5 quick presets, m manual YYYY-MM-DDTHH:MM, Enter save)"),
        Line::from("x: mark resolved (y confirm, n cancel)"),
        Line::from("up/down or j/k, page up/down, g/G: move selection"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"))
    .wrap(Wrap { trim: true });

    frame.render_widget(help, area);
}

fn render_raise_form(frame: &mut Frame<'_>, form: &RaiseForm) {
    let area = centered_rect(frame.area(), 70, 60);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Raise Ticket (Enter next/submit, Esc close)");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (row, field) in RaiseField::ALL.into_iter().enumerate() {
        let y = inner.y + (row as u16) * 3;
        if y + 3 > inner.y + inner.height {
            break;
        }
        let field_area = Rect::new(inner.x, y, inner.width, 3);
        render_text_input(
            frame,
            form.input(field),
            field.label(),
            field_area,
            form.focus == field,
        );
    }
}

fn render_deadline_dialog(frame: &mut Frame<'_>, dialog: &DeadlineDialog) {
    let area = centered_rect(frame.area(), 60, 60);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Set Deadline (Enter save, Esc close)");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = deadline_dialog_lines(dialog);
    let preset_height = (lines.len() as u16).min(inner.height.saturating_sub(3));
    let presets = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>());
    frame.render_widget(
        presets,
        Rect::new(inner.x, inner.y, inner.width, preset_height),
    );

    if inner.height >= preset_height + 3 {
        let manual_area = Rect::new(inner.x, inner.y + preset_height, inner.width, 3);
        render_text_input(
            frame,
            &dialog.manual,
            "m: custom YYYY-MM-DDTHH:MM",
            manual_area,
            dialog.editing_manual,
        );
    }
}

fn render_confirm(frame: &mut Frame<'_>, request: &ResolveRequest) {
    let area = centered_rect(frame.area(), 50, 30);
    frame.render_widget(Clear, area);
    let mut lines = request
        .prompt()
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from("y / Enter: confirm    n / Esc: cancel"));
    let confirm = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .wrap(Wrap { trim: false });
    frame.render_widget(confirm, area);
}

fn render_text_input(frame: &mut Frame<'_>, input: &Input, label: &str, area: Rect, focused: bool) {
    let width = shrink_by_border(area).width.max(1) as usize;
    let scroll = input.visual_scroll(width);
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(label.to_string()),
        );
    frame.render_widget(paragraph, area);

    if focused {
        let cursor = input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
    }
}
