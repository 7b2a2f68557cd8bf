//! Warehouse list view - searchable by name or id, sorted by creation date

use super::listing_frame::{
    draw_listing, footer_line, listing_key_action, search_line, ListingFrame, ListingKeys,
};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::format_date;
use crate::model::listing::sort_by_date;
use crate::model::records::Warehouse;
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
    sort: true,
    selection: false,
    channels: false,
};

pub struct WarehouseListView {
    warehouses: Vec<Warehouse>,
    pub listing: ListingState,
    pub focused: bool,
}

impl WarehouseListView {
    pub fn new(warehouses: Vec<Warehouse>) -> Self {
        Self {
            warehouses,
            listing: ListingState::default(),
            focused: false,
        }
    }

    pub fn sorted(&self) -> Vec<&Warehouse> {
        let mut rows: Vec<&Warehouse> = self
            .warehouses
            .iter()
            .filter(|w| self.listing.matches(&[w.name.as_deref(), w.id.as_deref()]))
            .collect();
        sort_by_date(&mut rows, self.listing.sort, |w| w.created);
        rows
    }

    fn row(warehouse: &Warehouse) -> Vec<Cell> {
        let status_color = if warehouse.status.eq_ignore_ascii_case("active") {
            Color::Green
        } else {
            Color::Gray
        };
        vec![
            Cell::new(warehouse.display_name()),
            Cell::dim(format!("ID: {}", warehouse.id.as_deref().unwrap_or("-"))),
            Cell::new(warehouse.channel.as_str()),
            Cell::new(format_date(warehouse.created)),
            Cell::styled(warehouse.status.as_str(), Style::default().fg(status_color)),
        ]
    }
}

impl Component for WarehouseListView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, KEYS))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let visible = self.sorted().len();
        match action {
            Action::NextItem => self.listing.cursor_down(visible),
            Action::PrevItem => self.listing.cursor_up(),
            Action::FirstItem => self.listing.cursor = 0,
            Action::LastItem => self.listing.cursor = visible.saturating_sub(1),
            Action::ToggleSort => self.listing.toggle_sort(),
            Action::EnterSearchMode => self.listing.enter_search_mode(),
            Action::ExitSearchMode => self.listing.exit_search_mode(),
            Action::SearchInput(c) => self.listing.search_input(c),
            Action::SearchBackspace => self.listing.search_backspace(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let sorted = self.sorted();
        let rows: Vec<Vec<Cell>> = sorted.iter().map(|w| Self::row(w)).collect();
        let cursor = self.listing.clamped_cursor(rows.len());
        let created_header = format!("Created On {}", self.listing.sort.arrow());
        let headers = ["Name", "ID", "Channel", created_header.as_str(), "Status"];

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Warehouses",
                preamble: vec![search_line(&self.listing, "Search by name or ID")],
                table: build_table_lines(&headers, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No warehouses found",
                footer: footer_line(sorted.len(), None),
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

    fn view() -> WarehouseListView {
        let warehouses = [
            json!({"id": "w-1", "name": "Main", "created_at": "2021-01-01", "channel_id": 7}),
            json!({"_id": {"$oid": "w-2"}, "name": "Overflow", "createdAt": "2023-01-01"}),
            json!({"id": "w-3", "status": "Inactive"}),
        ]
        .iter()
        .map(Warehouse::from_value)
        .collect();
        WarehouseListView::new(warehouses)
    }

    fn ids(view: &WarehouseListView) -> Vec<String> {
        view.sorted().iter().filter_map(|w| w.id.clone()).collect()
    }

    #[test]
    fn test_newest_first_with_undated_rows_last() {
        assert_eq!(ids(&view()), vec!["w-2", "w-1", "w-3"]);
    }

    #[test]
    fn test_search_matches_id() {
        let mut view = view();
        for c in "W-1".chars() {
            view.update(Action::SearchInput(c)).unwrap();
        }
        assert_eq!(ids(&view), vec!["w-1"]);
    }

    #[test]
    fn test_row_labels() {
        let view = view();
        let texts: Vec<String> = WarehouseListView::row(view.sorted()[1])
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["Main", "ID: w-1", "Channel 7", "01/01/2021", "Active"]);
    }
}
