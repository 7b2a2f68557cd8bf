//! Product list view
//!
//! Searchable, paginated product table with a per-row selection set. The
//! header toggle selects the current page only; clearing it empties the whole
//! set.

use super::listing_frame::{
    draw_listing, footer_line, listing_key_action, search_line, ListingFrame, ListingKeys,
};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::{product_status_tone, StatusTone, NOT_AVAILABLE};
use crate::model::records::Product;
use crate::model::ListingState;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use std::collections::HashSet;

const KEYS: ListingKeys = ListingKeys {
    search: true,
    paging: true,
    sort: false,
    selection: true,
    channels: false,
};

pub struct ProductListView {
    products: Vec<Product>,
    pub listing: ListingState,
    selected: HashSet<String>,
    pub focused: bool,
}

impl ProductListView {
    pub fn new(products: Vec<Product>, page_size: usize) -> Self {
        Self {
            products,
            listing: ListingState::paginated(page_size),
            selected: HashSet::new(),
            focused: false,
        }
    }

    /// Selection key: `_id.$oid` / `id`, else the record's position
    fn row_key(product: &Product, index: usize) -> String {
        product.id.clone().unwrap_or_else(|| format!("#{}", index))
    }

    /// Products matching the query on title or SKU, with their original index
    pub fn filtered(&self) -> Vec<(usize, &Product)> {
        self.products
            .iter()
            .enumerate()
            .filter(|(_, p)| self.listing.matches(&[p.title.as_deref(), p.sku.as_deref()]))
            .collect()
    }

    fn page_keys(&self) -> Vec<String> {
        let filtered = self.filtered();
        self.listing
            .page_slice(&filtered)
            .iter()
            .map(|(i, p)| Self::row_key(p, *i))
            .collect()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether every row of a non-empty page is selected
    pub fn page_fully_selected(&self) -> bool {
        let keys = self.page_keys();
        !keys.is_empty() && keys.iter().all(|k| self.selected.contains(k))
    }

    fn toggle_row(&mut self) {
        let keys = self.page_keys();
        let Some(cursor) = self.listing.clamped_cursor(keys.len()) else {
            return;
        };
        let key = &keys[cursor];
        if !self.selected.remove(key) {
            self.selected.insert(key.clone());
        }
    }

    fn toggle_page(&mut self) {
        if self.page_fully_selected() {
            self.selected.clear();
        } else {
            self.selected = self.page_keys().into_iter().collect();
        }
    }

    fn row(&self, index: usize, product: &Product) -> Vec<Cell> {
        let checked = self.is_selected(&Self::row_key(product, index));
        let status_color = match product_status_tone(product.status.as_deref()) {
            StatusTone::Positive => Color::Green,
            StatusTone::Warning => Color::Yellow,
            StatusTone::Neutral => Color::Gray,
        };
        let title = if product.has_variants {
            format!("{} [Variants]", product.title_or_na())
        } else {
            product.title_or_na().to_string()
        };

        vec![
            Cell::styled(if checked { "[x]" } else { "[ ]" }, Style::default().fg(Color::Green)),
            Cell::dim(product.main_image().unwrap_or("Image")),
            Cell::new(title),
            Cell::new(product.sku_or_na()),
            Cell::new(product.price.plain()),
            Cell::new(product.channels.as_deref().unwrap_or(NOT_AVAILABLE)),
            Cell::styled(
                product.status.as_deref().unwrap_or("Unknown"),
                Style::default().fg(status_color),
            ),
        ]
    }
}

impl Component for ProductListView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, KEYS))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let count = self.filtered().len();
        let visible = self.page_keys().len();
        match action {
            Action::NextItem => self.listing.cursor_down(visible),
            Action::PrevItem => self.listing.cursor_up(),
            Action::FirstItem => self.listing.cursor = 0,
            Action::LastItem => self.listing.cursor = visible.saturating_sub(1),
            Action::NextPage => self.listing.next_page(count),
            Action::PrevPage => self.listing.prev_page(),
            Action::EnterSearchMode => self.listing.enter_search_mode(),
            Action::ExitSearchMode => self.listing.exit_search_mode(),
            Action::SearchInput(c) => self.listing.search_input(c),
            Action::SearchBackspace => self.listing.search_backspace(),
            Action::ToggleRowSelection => self.toggle_row(),
            Action::TogglePageSelection => self.toggle_page(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let filtered = self.filtered();
        let page = self.listing.page_slice(&filtered);
        let rows: Vec<Vec<Cell>> = page.iter().map(|(i, p)| self.row(*i, p)).collect();
        let cursor = self.listing.clamped_cursor(rows.len());

        let check_all = if self.page_fully_selected() { "[x]" } else { "[ ]" };
        let headers = [check_all, "Image", "Title", "SKU", "Price (INR)", "Channels", "Status"];

        let mut preamble = vec![search_line(&self.listing, "Search by title or SKU")];
        let selected = self.selected_count();
        if selected > 0 {
            preamble.push(Line::from(Span::styled(
                format!(" {} selected", selected),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
        }

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Products",
                preamble,
                table: build_table_lines(&headers, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No products found",
                footer: footer_line(filtered.len(), Some(self.listing.page_label(filtered.len()))),
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

    fn view(count: usize) -> ProductListView {
        let products = (0..count)
            .map(|i| Product::from_value(&json!({"id": format!("p{}", i), "title": format!("Item {}", i)})))
            .collect();
        ProductListView::new(products, 10)
    }

    #[test]
    fn test_search_matches_sku_case_insensitively() {
        let products = vec![
            Product::from_value(&json!({"title": "A", "sku": "S1", "price": 1})),
            Product::from_value(&json!({"title": "B", "sku": "S2", "price": 2})),
        ];
        let mut view = ProductListView::new(products, 10);
        view.update(Action::SearchInput('s')).unwrap();
        view.update(Action::SearchInput('1')).unwrap();

        let rows = view.filtered();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.title.as_deref(), Some("A"));
    }

    #[test]
    fn test_select_page_does_not_span_pages() {
        let mut view = view(25);
        view.update(Action::TogglePageSelection).unwrap();
        assert_eq!(view.selected_count(), 10);
        assert!(view.page_fully_selected());

        view.update(Action::NextPage).unwrap();
        assert!(!view.page_fully_selected());
        view.update(Action::TogglePageSelection).unwrap();
        assert_eq!(view.selected_count(), 10);
        assert!(view.is_selected("p10"));
        assert!(!view.is_selected("p0"));

        view.update(Action::TogglePageSelection).unwrap();
        assert_eq!(view.selected_count(), 0);
    }

    #[test]
    fn test_toggle_row_under_cursor() {
        let mut view = view(3);
        view.update(Action::NextItem).unwrap();
        view.update(Action::ToggleRowSelection).unwrap();
        assert!(view.is_selected("p1"));
        view.update(Action::ToggleRowSelection).unwrap();
        assert!(!view.is_selected("p1"));
    }

    #[test]
    fn test_paging_clamps_to_last_page() {
        let mut view = view(25);
        for _ in 0..5 {
            view.update(Action::NextPage).unwrap();
        }
        assert_eq!(view.listing.page, 3);
        assert_eq!(view.page_keys().len(), 5);
    }
}
