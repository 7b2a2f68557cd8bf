//! File selector - the tool outputs listed by the mapper
//!
//! `Enter` asks the app to load the highlighted file. The loaded file and the
//! one still in flight are marked so the user can tell them apart.

use crate::action::Action;
use crate::component::Component;
use crate::model::state::{AppState, MapperStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct FileSelector {
    files: Vec<String>,
    loaded: Option<String>,
    pending: Option<String>,
    mapper_status: MapperStatus,
    pub list_state: ListState,
    pub focused: bool,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from the session state, keeping the highlight in range
    pub fn sync(&mut self, state: &AppState) {
        self.files.clone_from(&state.files);
        self.loaded.clone_from(&state.dataset_file);
        self.pending.clone_from(&state.pending_file);
        self.mapper_status = state.mapper_status;

        let selected = match (self.list_state.selected(), self.files.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    /// File under the highlight
    pub fn highlighted(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|i| self.files.get(i))
            .map(String::as_str)
    }

    fn next(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if i + 1 < self.files.len() {
                self.list_state.select(Some(i + 1));
            }
        }
    }

    fn previous(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }

    fn item(&self, file: &str) -> ListItem<'static> {
        let (marker, marker_style) = if self.pending.as_deref() == Some(file) {
            ("… ", Style::default().fg(Color::Yellow))
        } else if self.loaded.as_deref() == Some(file) {
            ("● ", Style::default().fg(Color::Green))
        } else {
            ("  ", Style::default())
        };
        ListItem::new(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(file.to_string(), Style::default().fg(Color::White)),
        ]))
    }
}

impl Component for FileSelector {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter | KeyCode::Char('l') => Some(Action::LoadSelectedFile),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.next(),
            Action::PrevItem => self.previous(),
            Action::FirstItem if !self.files.is_empty() => self.list_state.select(Some(0)),
            Action::LastItem if !self.files.is_empty() => {
                self.list_state.select(Some(self.files.len() - 1))
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Tool Outputs ({}) ", self.files.len()))
            .border_style(Style::default().fg(border_color));

        if self.files.is_empty() {
            let message = match self.mapper_status {
                MapperStatus::Pending => "Loading mapper...",
                MapperStatus::Loaded | MapperStatus::Fallback => "No tool outputs listed",
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        let items: Vec<ListItem> = self.files.iter().map(|f| self.item(f)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(files: &[&str]) -> AppState {
        AppState {
            files: files.iter().map(|f| f.to_string()).collect(),
            ..AppState::default()
        }
    }

    #[test]
    fn test_sync_selects_first_file() {
        let mut selector = FileSelector::new();
        assert_eq!(selector.highlighted(), None);

        selector.sync(&state(&["a.json", "b.json"]));
        assert_eq!(selector.highlighted(), Some("a.json"));
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut selector = FileSelector::new();
        selector.sync(&state(&["a.json", "b.json"]));

        selector.update(Action::NextItem).unwrap();
        selector.update(Action::NextItem).unwrap();
        assert_eq!(selector.highlighted(), Some("b.json"));

        selector.update(Action::FirstItem).unwrap();
        selector.update(Action::PrevItem).unwrap();
        assert_eq!(selector.highlighted(), Some("a.json"));
    }

    #[test]
    fn test_sync_clamps_when_list_shrinks() {
        let mut selector = FileSelector::new();
        selector.sync(&state(&["a.json", "b.json", "c.json"]));
        selector.update(Action::LastItem).unwrap();

        selector.sync(&state(&["a.json"]));
        assert_eq!(selector.highlighted(), Some("a.json"));
    }
}
