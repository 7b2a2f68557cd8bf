//! Product table view - a flat table of every product

use super::listing_frame::{
    draw_listing, exact_active_color, footer_line, listing_key_action, ListingFrame, ListingKeys,
};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::NOT_AVAILABLE;
use crate::model::records::Product;
use crate::model::ListingState;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    Frame,
};

const HEADERS: [&str; 6] = ["Image", "Title", "SKU", "Price", "Status", "Marketplace"];

pub struct ProductTableView {
    products: Vec<Product>,
    listing: ListingState,
    pub focused: bool,
}

impl ProductTableView {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            listing: ListingState::default(),
            focused: false,
        }
    }

    fn row(product: &Product) -> Vec<Cell> {
        let status_color = exact_active_color(product.status.as_deref());
        vec![
            Cell::dim(product.main_image().unwrap_or("-")),
            Cell::new(product.title_or_na()),
            Cell::new(product.sku_or_na()),
            Cell::new(product.price.dollars()),
            Cell::styled(
                product.status.as_deref().unwrap_or(NOT_AVAILABLE),
                Style::default().fg(status_color),
            ),
            Cell::new(product.source.as_deref().unwrap_or(NOT_AVAILABLE)),
        ]
    }
}

impl Component for ProductTableView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, ListingKeys::default()))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.listing.cursor_down(self.products.len()),
            Action::PrevItem => self.listing.cursor_up(),
            Action::FirstItem => self.listing.cursor = 0,
            Action::LastItem => self.listing.cursor = self.products.len().saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows: Vec<Vec<Cell>> = self.products.iter().map(Self::row).collect();
        let cursor = self.listing.clamped_cursor(rows.len());

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Product Table",
                preamble: Vec::new(),
                table: build_table_lines(&HEADERS, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No products found",
                footer: footer_line(self.products.len(), None),
                focused: self.focused,
            },
        );
        Ok(())
    }
}
