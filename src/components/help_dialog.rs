//! Shortcut reference shown with `?`

use super::layout::centered_popup;
use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const KEY_COLUMN: usize = 14;
const DIALOG_WIDTH: u16 = 60;

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        "Files",
        &[
            ("j / k", "Move through the file list"),
            ("g / G", "First / last file"),
            ("Enter / l", "Load the highlighted file"),
            ("Tab", "Switch focus between files and view"),
        ],
    ),
    (
        "Listing Views",
        &[
            ("j / k", "Move the row cursor"),
            ("/", "Search the current view"),
            ("Esc / Enter", "Leave search mode"),
            ("n / →", "Next page"),
            ("p / ←", "Previous page"),
            ("s", "Toggle date sort order"),
        ],
    ),
    (
        "Product List",
        &[("Space", "Toggle row selection"), ("a", "Select or clear the current page")],
    ),
    ("Orders", &[("c", "Choose sales channel")]),
    (
        "General",
        &[("?", "Show this help"), ("q", "Quit"), ("Ctrl+c", "Quit immediately")],
    ),
];

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl HelpDialog {
    fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => return Ok(Some(Action::CloseModal)),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = help_lines();
        let total = lines.len();
        let popup = centered_popup(area, DIALOG_WIDTH, total as u16 + 2);
        let visible = popup.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard Shortcuts (q to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(block).scroll((self.scroll_offset as u16, 0)),
            popup,
        );

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup.inner(Margin { vertical: 1, horizontal: 0 }),
                &mut state,
            );
        }

        Ok(())
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (index, (title, shortcuts)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(format!(" {}", title), heading)));
        for (key, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:width$}", key, width = KEY_COLUMN), key_style),
                Span::raw(*description),
            ]));
        }
    }
    lines
}
