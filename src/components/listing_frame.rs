//! Shared chrome for the listing views: title block, search line, table body
//! and the `Total Records` footer.

use super::table::TABLE_HEADER_LINES;
use crate::action::Action;
use crate::model::ListingState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything a listing view renders inside its panel
pub struct ListingFrame<'a> {
    pub title: &'a str,
    /// Lines drawn above the table (channel selector, search line)
    pub preamble: Vec<Line<'static>>,
    /// Output of `build_table_lines`
    pub table: Vec<Line<'static>>,
    /// Highlighted row, used to keep it scrolled into view
    pub cursor: Option<usize>,
    /// Rows rendered in the table
    pub row_count: usize,
    pub empty_message: &'a str,
    pub footer: Line<'static>,
    pub focused: bool,
}

/// Interactions a view supports beyond cursor movement
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingKeys {
    pub search: bool,
    pub paging: bool,
    pub sort: bool,
    pub selection: bool,
    pub channels: bool,
}

/// Map a key to a listing action, honouring what the view supports
pub fn listing_key_action(key: KeyEvent, keys: ListingKeys) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
        KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
        KeyCode::Char('/') if keys.search => Some(Action::EnterSearchMode),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown if keys.paging => {
            Some(Action::NextPage)
        }
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp if keys.paging => {
            Some(Action::PrevPage)
        }
        KeyCode::Char('s') if keys.sort => Some(Action::ToggleSort),
        KeyCode::Char(' ') if keys.selection => Some(Action::ToggleRowSelection),
        KeyCode::Char('a') if keys.selection => Some(Action::TogglePageSelection),
        KeyCode::Char('c') if keys.channels => Some(Action::OpenChannelPicker),
        _ => None,
    }
}

/// Search prompt; shows a caret while typing and a hint when idle
pub fn search_line(listing: &ListingState, hint: &str) -> Line<'static> {
    if listing.search_mode {
        Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(listing.query.clone(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if listing.query.is_empty() {
        Line::from(Span::styled(format!(" / {}", hint), Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(listing.query.clone(), Style::default().fg(Color::Cyan)),
        ])
    }
}

/// Status colour for the card and table views, which treat only the exact
/// string `active` as live
pub fn exact_active_color(status: Option<&str>) -> Color {
    if status == Some("active") {
        Color::Green
    } else {
        Color::Yellow
    }
}

/// `Total Records: N`, optionally followed by the page label
pub fn footer_line(total: usize, page_label: Option<String>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" Total Records: {}", total),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(label) = page_label {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(label, Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

pub fn draw_listing(frame: &mut Frame, area: Rect, listing: ListingFrame) {
    let border_color = if listing.focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", listing.title))
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(listing.preamble.len() as u16),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(listing.preamble), chunks[0]);

    let body_area = chunks[1];
    if listing.row_count == 0 {
        let mut lines = listing.table;
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                listing.empty_message.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        );
        frame.render_widget(Paragraph::new(lines), body_area);
    } else {
        let visible = body_area.height as usize;
        let scroll = listing
            .cursor
            .map(|row| TABLE_HEADER_LINES + row)
            .filter(|line| *line >= visible)
            .map(|line| line + 1 - visible)
            .unwrap_or(0);
        frame.render_widget(
            Paragraph::new(listing.table).scroll((scroll as u16, 0)),
            body_area,
        );
    }

    frame.render_widget(Paragraph::new(listing.footer), chunks[2]);
}
