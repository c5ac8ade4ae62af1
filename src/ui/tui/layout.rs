use ratatui::layout::{Constraint, Direction, Layout, Rect};

const TOAST_PANEL_WIDTH: u16 = 36;

#[derive(Debug, Clone, Copy)]
pub(crate) struct UiLayout {
    pub(crate) status: Rect,
    pub(crate) tabs: Rect,
    pub(crate) list: Rect,
    pub(crate) toasts: Rect,
    pub(crate) detail: Rect,
    pub(crate) keys: Rect,
}

pub(crate) fn ui_layout(area: Rect) -> UiLayout {
    let vertical_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(area);

    let main_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(TOAST_PANEL_WIDTH)])
        .split(vertical_areas[2]);

    UiLayout {
        status: vertical_areas[0],
        tabs: vertical_areas[1],
        list: main_areas[0],
        toasts: main_areas[1],
        detail: vertical_areas[3],
        keys: vertical_areas[4],
    }
}

pub(crate) fn shrink_by_border(area: Rect) -> Rect {
    if area.width <= 2 || area.height <= 2 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2)
}

pub(crate) fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let popup = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(popup[1])[1]
}
