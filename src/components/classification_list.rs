//! Classification list view - searchable by name or code

use super::listing_frame::{
    draw_listing, footer_line, listing_key_action, search_line, ListingFrame, ListingKeys,
};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::{label_or_na, snake_title_case};
use crate::model::records::Classification;
use crate::model::ListingState;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    Frame,
};

const KEYS: ListingKeys = ListingKeys {
    search: true,
    paging: false,
    sort: false,
    selection: false,
    channels: false,
};

const HEADERS: [&str; 3] = ["Classification", "Assigned Products", "Actions"];

pub struct ClassificationListView {
    classifications: Vec<Classification>,
    pub listing: ListingState,
    pub focused: bool,
}

impl ClassificationListView {
    pub fn new(classifications: Vec<Classification>) -> Self {
        Self {
            classifications,
            listing: ListingState::default(),
            focused: false,
        }
    }

    pub fn filtered(&self) -> Vec<&Classification> {
        self.classifications
            .iter()
            .filter(|c| self.listing.matches(&[c.name.as_deref(), c.code.as_deref()]))
            .collect()
    }

    fn row(classification: &Classification) -> Vec<Cell> {
        vec![
            Cell::new(label_or_na(classification.name.as_deref(), snake_title_case)),
            Cell::styled(classification.count.to_string(), Style::default().fg(Color::Cyan)),
            Cell::dim("Edit"),
        ]
    }
}

impl Component for ClassificationListView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, KEYS))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let visible = self.filtered().len();
        match action {
            Action::NextItem => self.listing.cursor_down(visible),
            Action::PrevItem => self.listing.cursor_up(),
            Action::FirstItem => self.listing.cursor = 0,
            Action::LastItem => self.listing.cursor = visible.saturating_sub(1),
            Action::EnterSearchMode => self.listing.enter_search_mode(),
            Action::ExitSearchMode => self.listing.exit_search_mode(),
            Action::SearchInput(c) => self.listing.search_input(c),
            Action::SearchBackspace => self.listing.search_backspace(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let filtered = self.filtered();
        let rows: Vec<Vec<Cell>> = filtered.iter().map(|c| Self::row(c)).collect();
        let cursor = self.listing.clamped_cursor(rows.len());

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Classifications",
                preamble: vec![search_line(&self.listing, "Search by name or code")],
                table: build_table_lines(&HEADERS, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No classifications found",
                footer: footer_line(filtered.len(), None),
                focused: self.focused,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view() -> ClassificationListView {
        let classifications = [
            json!({"name": "HOME_DECOR", "code": "HD-1", "count": 4}),
            json!({"name": "garden", "code": "GX-2"}),
        ]
        .iter()
        .map(Classification::from_value)
        .collect();
        ClassificationListView::new(classifications)
    }

    #[test]
    fn test_search_matches_code() {
        let mut view = view();
        for c in "gx".chars() {
            view.update(Action::SearchInput(c)).unwrap();
        }
        let rows = view.filtered();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("garden"));
    }

    #[test]
    fn test_row_labels() {
        let rows: Vec<Vec<String>> = view()
            .filtered()
            .into_iter()
            .map(|c| ClassificationListView::row(c).into_iter().map(|cell| cell.text).collect())
            .collect();
        assert_eq!(rows[0], vec!["Home Decor", "4", "Edit"]);
        assert_eq!(rows[1], vec!["Garden", "0", "Edit"]);
    }
}
