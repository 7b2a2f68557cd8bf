//! Channel list view - connected marketplace accounts with token status

use super::listing_frame::{draw_listing, footer_line, listing_key_action, ListingFrame, ListingKeys};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::channel::{ChannelBrand, TokenStatus};
use crate::model::records::ChannelAccount;
use crate::model::ListingState;
use anyhow::Result;
use chrono::Utc;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};

const HEADERS: [&str; 5] = ["", "Channel", "Marketplace", "Token", "Action"];

pub struct ChannelListView {
    accounts: Vec<ChannelAccount>,
    listing: ListingState,
    /// Reference time for token expiry, Unix seconds
    now: i64,
    pub focused: bool,
}

impl ChannelListView {
    pub fn new(accounts: Vec<ChannelAccount>) -> Self {
        Self::with_now(accounts, Utc::now().timestamp())
    }

    pub fn with_now(accounts: Vec<ChannelAccount>, now: i64) -> Self {
        Self {
            accounts,
            listing: ListingState::default(),
            now,
            focused: false,
        }
    }

    fn brand_color(brand: ChannelBrand) -> Color {
        match brand {
            ChannelBrand::Amazon => Color::Yellow,
            ChannelBrand::TikTok => Color::Magenta,
            ChannelBrand::Ebay => Color::Blue,
            ChannelBrand::Walmart => Color::Cyan,
            ChannelBrand::Shein => Color::White,
            ChannelBrand::Default => Color::DarkGray,
        }
    }

    fn row(&self, account: &ChannelAccount) -> Vec<Cell> {
        let brand = ChannelBrand::classify(account);
        let token = TokenStatus::classify(account.expires_in, self.now);

        let notice = match token {
            TokenStatus::Expiring => Cell::styled("Token Expiry Notice", Style::default().fg(Color::Yellow)),
            TokenStatus::Expired => Cell::styled("Expired", Style::default().fg(Color::Red)),
            TokenStatus::Valid | TokenStatus::Unknown => Cell::dim(""),
        };
        let action = if token.is_expired() {
            Cell::styled(
                "Re-Authorize",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Cell::dim("")
        };

        vec![
            Cell::styled(
                brand.logo(),
                Style::default().fg(Self::brand_color(brand)).add_modifier(Modifier::BOLD),
            ),
            Cell::new(account.display_name()),
            Cell::dim(account.subtitle()),
            notice,
            action,
        ]
    }
}

impl Component for ChannelListView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(listing_key_action(key, ListingKeys::default()))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.listing.cursor_down(self.accounts.len()),
            Action::PrevItem => self.listing.cursor_up(),
            Action::FirstItem => self.listing.cursor = 0,
            Action::LastItem => self.listing.cursor = self.accounts.len().saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows: Vec<Vec<Cell>> = self.accounts.iter().map(|a| self.row(a)).collect();
        let cursor = self.listing.clamped_cursor(rows.len());

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Channels",
                preamble: Vec::new(),
                table: build_table_lines(&HEADERS, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No channels found",
                footer: footer_line(self.accounts.len(), None),
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

    const NOW: i64 = 1_750_000_000;
    const DAY: i64 = 86_400;

    fn texts(view: &ChannelListView, value: serde_json::Value) -> Vec<String> {
        view.row(&ChannelAccount::from_value(&value))
            .into_iter()
            .map(|c| c.text)
            .collect()
    }

    #[test]
    fn test_expiring_token_shows_notice() {
        let view = ChannelListView::with_now(Vec::new(), NOW);
        let row = texts(&view, json!({"name": "Shop", "channel": {"name": "Amazon"}, "expires_in": NOW + 10 * DAY}));
        assert_eq!(row, vec!["a", "Shop", "Amazon", "Token Expiry Notice", ""]);
    }

    #[test]
    fn test_expired_token_offers_reauthorize() {
        let view = ChannelListView::with_now(Vec::new(), NOW);
        let row = texts(&view, json!({"expires_in": (NOW - 10 * DAY).to_string()}));
        assert_eq!(row, vec!["?", "Unnamed Channel", "Marketplace", "Expired", "Re-Authorize"]);
    }
}
