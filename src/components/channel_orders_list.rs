//! Channel orders view
//!
//! Orders are scoped to one sales channel at a time. The channel list is
//! derived from the orders themselves and the first channel seen is selected
//! on load; `c` opens the picker to switch.

use super::listing_frame::{
    draw_listing, footer_line, listing_key_action, search_line, ListingFrame, ListingKeys,
};
use super::table::{build_table_lines, Cell};
use crate::action::Action;
use crate::component::Component;
use crate::model::format::{
    format_amount, format_date, label_or_na, order_status_tone, snake_title_case, StatusTone,
};
use crate::model::orders::{channel_options, filter_orders, ChannelOption};
use crate::model::records::Order;
use crate::model::ListingState;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const KEYS: ListingKeys = ListingKeys {
    search: true,
    paging: false,
    sort: false,
    selection: false,
    channels: true,
};

const HEADERS: [&str; 6] = ["Order ID", "Fulfilled by", "Created On", "Price (USD)", "Status", "Error"];

pub struct ChannelOrdersListView {
    orders: Vec<Order>,
    channels: Vec<ChannelOption>,
    selected_channel: Option<usize>,
    pub listing: ListingState,
    pub focused: bool,
}

impl ChannelOrdersListView {
    pub fn new(orders: Vec<Order>) -> Self {
        let channels = channel_options(&orders);
        let selected_channel = if channels.is_empty() { None } else { Some(0) };
        Self {
            orders,
            channels,
            selected_channel,
            listing: ListingState::default(),
            focused: false,
        }
    }

    pub fn channels(&self) -> &[ChannelOption] {
        &self.channels
    }

    pub fn selected_channel(&self) -> Option<&ChannelOption> {
        self.selected_channel.and_then(|i| self.channels.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_channel
    }

    /// Switch channel; out-of-range indices are ignored
    pub fn select_channel(&mut self, index: usize) {
        if index < self.channels.len() {
            self.selected_channel = Some(index);
            self.listing.cursor = 0;
        }
    }

    pub fn filtered(&self) -> Vec<&Order> {
        filter_orders(&self.orders, self.selected_channel(), &self.listing.query)
    }

    fn row(order: &Order) -> Vec<Cell> {
        let status_color = match order_status_tone(order.status.as_deref()) {
            StatusTone::Positive => Color::Green,
            StatusTone::Warning => Color::Yellow,
            StatusTone::Neutral => Color::Gray,
        };
        let error = if order.error_message.is_some() {
            Cell::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        } else {
            Cell::dim("")
        };

        vec![
            Cell::styled(order.display_id(), Style::default().fg(Color::Cyan)),
            Cell::new(label_or_na(order.fulfillment_type.as_deref(), snake_title_case)),
            Cell::new(format_date(order.created)),
            Cell::new(format_amount(order.total)),
            Cell::styled(
                label_or_na(order.status.as_deref(), snake_title_case),
                Style::default().fg(status_color),
            ),
            error,
        ]
    }

    fn channel_line(&self) -> Line<'static> {
        let name = self
            .selected_channel()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "None".to_string());
        Line::from(vec![
            Span::styled(" Channel: ", Style::default().fg(Color::DarkGray)),
            Span::styled(name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(" (c to change)", Style::default().fg(Color::DarkGray)),
        ])
    }
}

impl Component for ChannelOrdersListView {
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
            Action::SelectChannel(index) => self.select_channel(index),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let filtered = self.filtered();
        let rows: Vec<Vec<Cell>> = filtered.iter().map(|o| Self::row(o)).collect();
        let cursor = self.listing.clamped_cursor(rows.len());

        draw_listing(
            frame,
            area,
            ListingFrame {
                title: "Orders",
                preamble: vec![
                    self.channel_line(),
                    search_line(&self.listing, "Search by order ID or name"),
                ],
                table: build_table_lines(&HEADERS, &rows, cursor),
                cursor,
                row_count: rows.len(),
                empty_message: "No orders found",
                footer: footer_line(filtered.len(), None),
                focused: self.focused,
            },
        );
        Ok(())
    }
}
