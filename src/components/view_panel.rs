//! View panel - renders whichever listing the active configuration names
//!
//! The panel is rebuilt from a [`Resolution`] each time the active
//! configuration or the dataset changes, so view-local state (search text,
//! page, sort, selection) starts fresh for every load.

use super::attribute_list::AttributeListView;
use super::channel_list::ChannelListView;
use super::channel_orders_list::ChannelOrdersListView;
use super::classification_list::ClassificationListView;
use super::product_card::ProductCardView;
use super::product_list::ProductListView;
use super::product_table::ProductTableView;
use super::warehouse_list::WarehouseListView;
use crate::action::Action;
use crate::component::Component;
use crate::model::orders::ChannelOption;
use crate::model::view::{not_found_message, Resolution, ViewData};
#[cfg(test)]
use crate::model::view::ViewKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Active View
// ═══════════════════════════════════════════════════════════════════════════════

/// One instance of a registered view
pub enum ActiveView {
    ProductCard(ProductCardView),
    ProductTable(ProductTableView),
    ProductList(ProductListView),
    AttributeList(AttributeListView),
    ChannelList(ChannelListView),
    ClassificationList(ClassificationListView),
    WarehouseList(WarehouseListView),
    ChannelOrdersList(ChannelOrdersListView),
}

impl ActiveView {
    pub fn new(data: ViewData, page_size: usize) -> Self {
        match data {
            ViewData::ProductCard(cards) => ActiveView::ProductCard(ProductCardView::new(cards)),
            ViewData::ProductTable(products) => ActiveView::ProductTable(ProductTableView::new(products)),
            ViewData::ProductList(products) => {
                ActiveView::ProductList(ProductListView::new(products, page_size))
            }
            ViewData::AttributeList(attributes) => {
                ActiveView::AttributeList(AttributeListView::new(attributes, page_size))
            }
            ViewData::ChannelList(accounts) => ActiveView::ChannelList(ChannelListView::new(accounts)),
            ViewData::ClassificationList(items) => {
                ActiveView::ClassificationList(ClassificationListView::new(items))
            }
            ViewData::WarehouseList(items) => ActiveView::WarehouseList(WarehouseListView::new(items)),
            ViewData::ChannelOrdersList(orders) => {
                ActiveView::ChannelOrdersList(ChannelOrdersListView::new(orders))
            }
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> ViewKind {
        match self {
            ActiveView::ProductCard(_) => ViewKind::ProductCard,
            ActiveView::ProductTable(_) => ViewKind::ProductTable,
            ActiveView::ProductList(_) => ViewKind::ProductList,
            ActiveView::AttributeList(_) => ViewKind::AttributeList,
            ActiveView::ChannelList(_) => ViewKind::ChannelList,
            ActiveView::ClassificationList(_) => ViewKind::ClassificationList,
            ActiveView::WarehouseList(_) => ViewKind::WarehouseList,
            ActiveView::ChannelOrdersList(_) => ViewKind::ChannelOrdersList,
        }
    }

    fn component(&mut self) -> &mut dyn Component {
        match self {
            ActiveView::ProductCard(view) => view,
            ActiveView::ProductTable(view) => view,
            ActiveView::ProductList(view) => view,
            ActiveView::AttributeList(view) => view,
            ActiveView::ChannelList(view) => view,
            ActiveView::ClassificationList(view) => view,
            ActiveView::WarehouseList(view) => view,
            ActiveView::ChannelOrdersList(view) => view,
        }
    }

    fn set_focused(&mut self, focused: bool) {
        match self {
            ActiveView::ProductCard(view) => view.focused = focused,
            ActiveView::ProductTable(view) => view.focused = focused,
            ActiveView::ProductList(view) => view.focused = focused,
            ActiveView::AttributeList(view) => view.focused = focused,
            ActiveView::ChannelList(view) => view.focused = focused,
            ActiveView::ClassificationList(view) => view.focused = focused,
            ActiveView::WarehouseList(view) => view.focused = focused,
            ActiveView::ChannelOrdersList(view) => view.focused = focused,
        }
    }

    /// Whether the view is capturing keystrokes for its search box
    pub fn search_mode(&self) -> bool {
        match self {
            ActiveView::ProductList(view) => view.listing.search_mode,
            ActiveView::AttributeList(view) => view.listing.search_mode,
            ActiveView::ClassificationList(view) => view.listing.search_mode,
            ActiveView::WarehouseList(view) => view.listing.search_mode,
            ActiveView::ChannelOrdersList(view) => view.listing.search_mode,
            ActiveView::ProductCard(_) | ActiveView::ProductTable(_) | ActiveView::ChannelList(_) => {
                false
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// View Panel
// ═══════════════════════════════════════════════════════════════════════════════

pub enum PanelContent {
    /// No dataset or no configuration yet
    Empty,
    /// The configuration names an unregistered view
    NotFound(String),
    View(ActiveView),
}

pub struct ViewPanel {
    pub content: PanelContent,
    /// File being fetched, shown while the panel is empty
    pub loading: Option<String>,
    focused: bool,
}

impl Default for ViewPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPanel {
    pub fn new() -> Self {
        Self {
            content: PanelContent::Empty,
            loading: None,
            focused: false,
        }
    }

    /// Replace the rendered view; any view-local state is discarded
    pub fn rebuild(&mut self, resolution: Resolution, page_size: usize) {
        self.content = match resolution {
            Resolution::Nothing => PanelContent::Empty,
            Resolution::NotFound(name) => PanelContent::NotFound(name),
            Resolution::Ready(data) => PanelContent::View(ActiveView::new(data, page_size)),
        };
        let focused = self.focused;
        self.set_focused(focused);
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if let PanelContent::View(view) = &mut self.content {
            view.set_focused(focused);
        }
    }

    #[cfg(test)]
    pub fn active_kind(&self) -> Option<ViewKind> {
        match &self.content {
            PanelContent::View(view) => Some(view.kind()),
            _ => None,
        }
    }

    pub fn search_mode(&self) -> bool {
        matches!(&self.content, PanelContent::View(view) if view.search_mode())
    }

    /// Channel options and current choice when the orders view is showing
    pub fn channel_options(&self) -> Option<(Vec<ChannelOption>, Option<usize>)> {
        match &self.content {
            PanelContent::View(ActiveView::ChannelOrdersList(view)) => {
                Some((view.channels().to_vec(), view.selected_index()))
            }
            _ => None,
        }
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(paragraph, area);
    }
}

/// Keys while a view's search box is open
fn search_key_action(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Char(c) => Some(Action::SearchInput(c)),
        _ => None,
    }
}

impl Component for ViewPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match &mut self.content {
            PanelContent::View(view) if view.search_mode() => Ok(search_key_action(key)),
            PanelContent::View(view) => view.component().handle_key_event(key),
            PanelContent::Empty | PanelContent::NotFound(_) => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match &mut self.content {
            PanelContent::View(view) => view.component().update(action),
            PanelContent::Empty | PanelContent::NotFound(_) => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match &mut self.content {
            PanelContent::View(view) => view.component().draw(frame, area),
            PanelContent::NotFound(name) => {
                let line = Line::from(Span::styled(
                    not_found_message(name),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
                self.draw_message(frame, area, vec![Line::from(""), line]);
                Ok(())
            }
            PanelContent::Empty => {
                let text = match &self.loading {
                    Some(file) => format!("Loading {}...", file),
                    None => "Select a tool output and press Enter".to_string(),
                };
                let line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
                self.draw_message(frame, area, vec![Line::from(""), line]);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mapper::ComponentConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn render(panel: &mut ViewPanel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| panel.draw(frame, frame.area()).unwrap())
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn config(name: &str) -> ComponentConfig {
        ComponentConfig {
            component_type: "list".into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_unknown_component_renders_inline_message() {
        let mut panel = ViewPanel::new();
        let document = json!({"data": []});
        panel.rebuild(Resolution::resolve(Some(&config("Bogus")), Some(&document)), 10);

        assert!(render(&mut panel).contains("Component Bogus not found"));
    }

    #[test]
    fn test_ready_resolution_builds_matching_view() {
        let mut panel = ViewPanel::new();
        let document = json!({"warehouses": [{"name": "Main"}]});
        panel.rebuild(Resolution::resolve(Some(&config("WarehouseList")), Some(&document)), 10);

        assert_eq!(panel.active_kind(), Some(ViewKind::WarehouseList));
        let screen = render(&mut panel);
        assert!(screen.contains("Main"));
        assert!(screen.contains("Total Records: 1"));
    }

    #[test]
    fn test_search_mode_captures_typing() {
        let mut panel = ViewPanel::new();
        let document = json!({"attributes": [{"name": "Size"}]});
        panel.rebuild(Resolution::resolve(Some(&config("AttributeList")), Some(&document)), 10);

        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let open = panel.handle_key_event(press(KeyCode::Char('/'))).unwrap();
        assert_eq!(open, Some(Action::EnterSearchMode));
        panel.update(Action::EnterSearchMode).unwrap();

        assert!(panel.search_mode());
        assert_eq!(
            panel.handle_key_event(press(KeyCode::Char('q'))).unwrap(),
            Some(Action::SearchInput('q'))
        );
    }

    #[test]
    fn test_rebuild_discards_view_state() {
        let mut panel = ViewPanel::new();
        let document = json!({"attributes": [{"name": "Size"}]});
        let resolution = || Resolution::resolve(Some(&config("AttributeList")), Some(&document));

        panel.rebuild(resolution(), 10);
        panel.update(Action::EnterSearchMode).unwrap();
        assert!(panel.search_mode());

        panel.rebuild(resolution(), 10);
        assert!(!panel.search_mode());
    }

    #[test]
    fn test_nothing_resolution_is_empty() {
        let mut panel = ViewPanel::new();
        panel.loading = Some("sample_tool.json".into());
        panel.rebuild(Resolution::resolve(None, None), 10);

        assert!(panel.active_kind().is_none());
        assert!(render(&mut panel).contains("Loading sample_tool.json..."));
    }
}
