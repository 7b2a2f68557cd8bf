//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub header: Rect,
    pub files: Rect,
    pub view: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Header, file selector | view panel, optional status line, help bar
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let mut constraints = vec![Constraint::Length(4), Constraint::Min(0)];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // Left: file selector (25%), right: active view (75%)
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(main_chunks[1]);

    let (status, help) = if has_status {
        (Some(main_chunks[2]), main_chunks[3])
    } else {
        (None, main_chunks[2])
    };

    MainLayout {
        header: main_chunks[0],
        files: body[0],
        view: body[1],
        status,
        help,
    }
}
