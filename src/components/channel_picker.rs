//! Channel picker dialog for the orders view

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::orders::ChannelOption;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct ChannelPicker {
    pub channels: Vec<ChannelOption>,
    /// Channel the orders view is currently scoped to
    pub current: Option<usize>,
    pub selected_index: usize,
    list_state: ListState,
}

impl Default for ChannelPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelPicker {
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            current: None,
            selected_index: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Replace the options and start the highlight on the active channel
    pub fn set_channels(&mut self, channels: Vec<ChannelOption>, current: Option<usize>) {
        self.channels = channels;
        self.current = current;
        self.selected_index = current.filter(|i| *i < self.channels.len()).unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.channels.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for ChannelPicker {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('c') => Some(Action::CloseModal),
            KeyCode::Enter if !self.channels.is_empty() => Some(Action::SelectChannel(self.selected_index)),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content_height = (self.channels.len().max(1) as u16) + 2;
        let popup_area = centered_popup(area, 50, (content_height + 6).max(10));
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        let current_name = self
            .current
            .and_then(|i| self.channels.get(i))
            .map(|c| c.name.as_str())
            .unwrap_or("none");
        let header = Paragraph::new(Line::from(Span::styled(
            format!("Current: {}", current_name),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select Channel ")
                .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(header, chunks[0]);

        if self.channels.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No channels in this output",
                Style::default().fg(Color::Yellow),
            )))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .channels
                .iter()
                .enumerate()
                .map(|(i, channel)| {
                    let is_current = Some(i) == self.current;
                    let name_style = if is_current {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let mut spans = vec![
                        Span::styled(if is_current { "● " } else { "  " }, Style::default().fg(Color::Green)),
                        Span::styled(channel.name.clone(), name_style),
                    ];
                    if !channel.id.is_empty() && channel.id != channel.name {
                        spans.push(Span::styled(
                            format!("  {}", channel.id),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc/c ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn picker() -> ChannelPicker {
        let mut picker = ChannelPicker::new();
        picker.set_channels(
            vec![
                ChannelOption { name: "Amazon".into(), id: "m1".into() },
                ChannelOption { name: "TikTok".into(), id: "m2".into() },
            ],
            Some(1),
        );
        picker
    }

    #[test]
    fn test_starts_on_current_channel() {
        let mut picker = picker();
        assert_eq!(picker.handle_key_event(key(KeyCode::Enter)).unwrap(), Some(Action::SelectChannel(1)));
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut picker = picker();
        picker.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(picker.selected_index, 1);
        picker.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        picker.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(picker.selected_index, 0);
    }

    #[test]
    fn test_enter_without_channels_does_nothing() {
        let mut picker = ChannelPicker::new();
        assert_eq!(picker.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        assert_eq!(picker.handle_key_event(key(KeyCode::Esc)).unwrap(), Some(Action::CloseModal));
    }
}
