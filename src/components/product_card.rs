//! Product card view - one card per product

use super::listing_frame::{exact_active_color, footer_line, listing_key_action, ListingKeys};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::{truncate_title, NOT_AVAILABLE};
use crate::model::view::ProductCardEntry;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TITLE_LIMIT: usize = 60;
const CARD_HEIGHT: usize = 8;
/// Images listed per card
const GALLERY_LIMIT: usize = 5;

pub struct ProductCardView {
    cards: Vec<ProductCardEntry>,
    cursor: usize,
    pub focused: bool,
}

impl ProductCardView {
    pub fn new(cards: Vec<ProductCardEntry>) -> Self {
        Self {
            cards,
            cursor: 0,
            focused: false,
        }
    }

    fn card_lines(entry: &ProductCardEntry, highlighted: bool) -> Vec<Line<'static>> {
        let product = &entry.product;
        let marker = if highlighted { "▶ " } else { "  " };
        let title_style = if highlighted {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        let status_color = exact_active_color(product.status.as_deref());
        let gallery = if product.images.is_empty() {
            "No images".to_string()
        } else {
            product
                .images
                .iter()
                .take(GALLERY_LIMIT)
                .map(|img| img.url.as_str())
                .collect::<Vec<_>>()
                .join("  ")
        };
        let label = Style::default().fg(Color::DarkGray);

        vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(truncate_title(product.title_or_na(), TITLE_LIMIT), title_style),
            ]),
            Line::from(vec![
                Span::styled("    SKU: ", label),
                Span::raw(product.sku_or_na().to_string()),
            ]),
            Line::from(vec![
                Span::styled("    Price: ", label),
                Span::styled(product.price.dollars(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("    Status: ", label),
                Span::styled(
                    product.status.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    Style::default().fg(status_color),
                ),
            ]),
            Line::from(vec![
                Span::styled("    Image: ", label),
                Span::styled(
                    product.main_image().unwrap_or("No image").to_string(),
                    Style::default().fg(Color::Blue),
                ),
            ]),
            Line::from(vec![
                Span::styled("    Gallery: ", label),
                Span::styled(gallery, Style::default().fg(Color::Blue)),
            ]),
            Line::from(vec![
                Span::styled("    View More: ", label),
                Span::styled(
                    format!("product/{}", product.product_id.as_deref().unwrap_or(&entry.key)),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(""),
        ]
    }
}

impl Component for ProductCardView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, ListingKeys::default()))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem if self.cursor + 1 < self.cards.len() => self.cursor += 1,
            Action::PrevItem => self.cursor = self.cursor.saturating_sub(1),
            Action::FirstItem => self.cursor = 0,
            Action::LastItem => self.cursor = self.cards.len().saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Products ")
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        if self.cards.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No products found",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(empty, chunks[0]);
        } else {
            let lines: Vec<Line> = self
                .cards
                .iter()
                .enumerate()
                .flat_map(|(i, entry)| Self::card_lines(entry, i == self.cursor))
                .collect();

            let visible = chunks[0].height as usize;
            let cursor_bottom = (self.cursor + 1) * CARD_HEIGHT;
            let scroll = cursor_bottom.saturating_sub(visible);

            frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), chunks[0]);
        }

        frame.render_widget(Paragraph::new(footer_line(self.cards.len(), None)), chunks[1]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::Product;
    use serde_json::json;

    fn entry(title: &str) -> ProductCardEntry {
        ProductCardEntry {
            key: format!("#{}", title),
            product: Product::from_value(&json!({"title": title, "price": 12.5, "status": "active"})),
        }
    }

    #[test]
    fn test_card_shows_price_and_truncated_title() {
        let long = "x".repeat(70);
        let lines = ProductCardView::card_lines(&entry(&long), false);
        let title: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        let price: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(lines.len(), CARD_HEIGHT);
        assert!(title.ends_with(&format!("{}...", "x".repeat(57))));
        assert!(price.ends_with("$12.50"));
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_gallery_lists_first_five_images() {
        let images: Vec<_> = (1..=7).map(|i| json!({"url": format!("{}.png", i)})).collect();
        let card = ProductCardEntry {
            key: "#0".into(),
            product: Product::from_value(&json!({"title": "Mug", "images": images})),
        };
        let lines = ProductCardView::card_lines(&card, false);
        assert_eq!(line_text(&lines[5]), "    Gallery: 1.png  2.png  3.png  4.png  5.png");

        let bare = ProductCardView::card_lines(&entry("bare"), false);
        assert_eq!(line_text(&bare[5]), "    Gallery: No images");
    }

    #[test]
    fn test_status_green_only_for_exact_active() {
        let status_color = |status: &str| {
            let card = ProductCardEntry {
                key: "#0".into(),
                product: Product::from_value(&json!({"status": status})),
            };
            ProductCardView::card_lines(&card, false)[3].spans[1].style.fg
        };
        assert_eq!(status_color("active"), Some(Color::Green));
        assert_eq!(status_color("Active"), Some(Color::Yellow));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut view = ProductCardView::new(vec![entry("a"), entry("b")]);
        view.update(Action::NextItem).unwrap();
        view.update(Action::NextItem).unwrap();
        assert_eq!(view.cursor, 1);
        view.update(Action::FirstItem).unwrap();
        assert_eq!(view.cursor, 0);
    }
}
