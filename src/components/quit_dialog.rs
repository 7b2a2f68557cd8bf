//! Quit confirmation dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct QuitDialog {
    /// File still being fetched, mentioned so the user knows it will be dropped
    pub pending_file: Option<String>,
}

impl QuitDialog {
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Close the tool output viewer?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(file) = &self.pending_file {
            lines.push(Line::from(Span::styled(
                format!("{} is still loading", file),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" y ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Quit  "),
            Span::styled(" n/Esc ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("Stay"),
        ]));
        lines
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = self.lines();
        let popup_area = centered_popup(area, 44, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Quit? ")
                    .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
