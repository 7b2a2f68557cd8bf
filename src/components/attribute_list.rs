//! Attribute list view - search by name, sort by creation date, paginated

use super::listing_frame::{
    draw_listing, footer_line, listing_key_action, search_line, ListingFrame, ListingKeys,
};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::{format_date, label_or_na, title_case, NOT_AVAILABLE};
use crate::model::listing::sort_by_date;
use crate::model::records::Attribute;
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
    paging: true,
    sort: true,
    selection: false,
    channels: false,
};

pub struct AttributeListView {
    attributes: Vec<Attribute>,
    pub listing: ListingState,
    pub focused: bool,
}

impl AttributeListView {
    pub fn new(attributes: Vec<Attribute>, page_size: usize) -> Self {
        Self {
            attributes,
            listing: ListingState::paginated(page_size),
            focused: false,
        }
    }

    /// Matching attributes in the current sort order
    pub fn sorted(&self) -> Vec<&Attribute> {
        let mut rows: Vec<&Attribute> = self
            .attributes
            .iter()
            .filter(|a| self.listing.matches(&[a.name.as_deref()]))
            .collect();
        sort_by_date(&mut rows, self.listing.sort, |a| a.created);
        rows
    }

    fn row(attribute: &Attribute) -> Vec<Cell> {
        let required = if attribute.required {
            Cell::styled("Yes", Style::default().fg(Color::Green))
        } else {
            Cell::dim("No")
        };
        vec![
            Cell::new(attribute.name.as_deref().unwrap_or(NOT_AVAILABLE)),
            Cell::new(label_or_na(attribute.kind.as_deref(), title_case)),
            required,
            Cell::new(format_date(attribute.created)),
        ]
    }
}

impl Component for AttributeListView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, KEYS))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let rows = self.sorted();
        let count = rows.len();
        let visible = self.listing.page_slice(&rows).len();
        match action {
            Action::NextItem => self.listing.cursor_down(visible),
            Action::PrevItem => self.listing.cursor_up(),
            Action::FirstItem => self.listing.cursor = 0,
            Action::LastItem => self.listing.cursor = visible.saturating_sub(1),
            Action::NextPage => self.listing.next_page(count),
            Action::PrevPage => self.listing.prev_page(),
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
        let rows: Vec<Vec<Cell>> = self.listing.page_slice(&sorted).iter().map(|a| Self::row(a)).collect();
        let cursor = self.listing.clamped_cursor(rows.len());
        let created_header = format!("Created On {}", self.listing.sort.arrow());
        let headers = ["Name", "Type", "Required", created_header.as_str()];

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Attributes",
                preamble: vec![search_line(&self.listing, "Search by name")],
                table: build_table_lines(&headers, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No attributes found",
                footer: footer_line(sorted.len(), Some(self.listing.page_label(sorted.len()))),
                focused: self.focused,
            },
        );
        Ok(())
    }
}
