//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. Session
//! data lives in [`AppState`] and only changes through its reducer; the App
//! turns fetch results into reducer events and keeps the views in step.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ChannelPicker, FileSelector, HelpDialog, HomeRenderContext, QuitDialog,
    ViewPanel,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{AppState, ComponentConfig, Focus, MapperStatus, Resolution, StateEvent};
use crate::services::{FetchMessage, Fetcher, ToolOutputSource};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Status line text after the mapper failed to load
const FALLBACK_NOTICE: &str = "Mapper unavailable, using fallback file list";

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    /// Mapper, file list, active configuration and dataset
    pub state: AppState,

    /// Background loader for the mapper and tool outputs
    fetcher: Fetcher,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Pane receiving navigation keys
    pub focus: Focus,

    pub should_quit: bool,

    /// Last load failure
    pub error: Option<String>,

    /// Informational notice (fallback file list, unmapped tool)
    pub status_message: Option<String>,

    /// Tool output passed in by the host, shown in the header
    host_output: Option<String>,

    page_size: usize,
    fallback_files: Vec<String>,

    /// Configuration and dataset revision the view panel was built from
    rendered: Option<(Option<ComponentConfig>, u64)>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub file_selector: FileSelector,
    pub view_panel: ViewPanel,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub channel_picker: ChannelPicker,
}

impl App {
    pub fn new(config: &Config, source: Arc<dyn ToolOutputSource>, host_output: Option<String>) -> Self {
        Self {
            state: AppState::new(),
            fetcher: Fetcher::new(source),
            modals: ModalStack::new(),
            focus: Focus::Files,
            should_quit: false,
            error: None,
            status_message: None,
            host_output,
            page_size: config.page_size,
            fallback_files: config.fallback_files.clone(),
            rendered: None,
            file_selector: FileSelector::new(),
            view_panel: ViewPanel::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            channel_picker: ChannelPicker::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.fetcher.spawn_mapper_load();
        self.apply_focus();
        self.sync_views();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top() {
            return self.handle_modal_key_event(modal, key);
        }

        // An open search box swallows every key, including the globals below
        if self.focus == Focus::View && self.view_panel.search_mode() {
            return self.view_panel.handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::OpenQuitDialog)),
            KeyCode::Char('?') => return Ok(Some(Action::OpenHelp)),
            KeyCode::Tab | KeyCode::BackTab => return Ok(Some(Action::ToggleFocus)),
            _ => {}
        }

        match self.focus {
            Focus::Files => self.file_selector.handle_key_event(key),
            Focus::View => self.view_panel.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "action");
        }
        match action {
            // ─────────────────────────────────────────────────────────────────
            // Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.process_fetch_messages(),
            Action::ForceQuit => self.should_quit = true,
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Files
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleFocus => {
                self.focus = self.focus.toggled();
                self.apply_focus();
            }
            Action::LoadSelectedFile => self.load_selected_file(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.pending_file.clone_from(&self.state.pending_file);
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenChannelPicker => {
                if let Some((channels, current)) = self.view_panel.channel_options() {
                    self.channel_picker.set_channels(channels, current);
                    self.modals.push(Modal::ChannelPicker);
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {}
            Action::SelectChannel(index) => {
                self.modals.pop();
                debug!(index, "channel selected");
                return self.view_panel.update(Action::SelectChannel(index));
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation, listing and search go to the focused pane
            // ─────────────────────────────────────────────────────────────────
            other => {
                return match self.focus {
                    Focus::Files => self.file_selector.update(other),
                    Focus::View => self.view_panel.update(other),
                };
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = render_context(
            &self.state,
            self.host_output.as_deref(),
            self.status_message.as_deref(),
            self.error.as_deref(),
            self.focus,
        );
        draw_home_screen(frame, area, &mut self.file_selector, &mut self.view_panel, &ctx)?;

        let modals: Vec<Modal> = self.modals.iter().collect();
        for modal in modals {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

/// The header names the file whose body is on screen, not the one in flight
fn render_context<'a>(
    state: &'a AppState,
    host_output: Option<&'a str>,
    status_message: Option<&'a str>,
    error: Option<&'a str>,
    focus: Focus,
) -> HomeRenderContext<'a> {
    HomeRenderContext {
        host_output,
        rendered_file: state.dataset_file.as_deref(),
        view_name: state.active.as_ref().map(|c| c.name.as_str()),
        status_message,
        error,
        focus,
    }
}

impl App {
    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::ChannelPicker => self.channel_picker.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
            Modal::ChannelPicker => self.channel_picker.draw(frame, area),
        }
    }

    fn apply_focus(&mut self) {
        self.file_selector.focused = self.focus == Focus::Files;
        self.view_panel.set_focused(self.focus == Focus::View);
    }

    /// Feed one event through the reducer and refresh dependent views
    fn apply(&mut self, event: StateEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(event);
        self.sync_views();
    }

    /// Push state into the components; the view panel is rebuilt only when
    /// the active configuration or the dataset changed
    fn sync_views(&mut self) {
        self.file_selector.sync(&self.state);
        self.view_panel.loading.clone_from(&self.state.pending_file);

        let key = (self.state.active.clone(), self.state.dataset_revision);
        if self.rendered.as_ref() == Some(&key) {
            return;
        }

        let resolution = Resolution::resolve(self.state.active.as_ref(), self.state.dataset.as_ref());
        match &resolution {
            Resolution::Nothing => {}
            Resolution::NotFound(name) => warn!(component = %name, "component not registered"),
            Resolution::Ready(data) if data.is_empty() => {
                warn!(view = data.kind().name(), "view has no records")
            }
            Resolution::Ready(data) => {
                info!(view = data.kind().name(), records = data.len(), "rendering view")
            }
        }
        self.view_panel.rebuild(resolution, self.page_size);
        self.rendered = Some(key);
    }

    fn load_selected_file(&mut self) {
        let Some(file) = self.file_selector.highlighted().map(str::to_string) else {
            return;
        };

        let tool = crate::model::mapper::tool_name(&file);
        match self.state.mapper.entry(tool) {
            Some(entry) if entry.config.is_none() => {
                warn!(%file, "mapper entry has no usable configuration");
                self.status_message = Some(format!("{} has no view configured", file));
            }
            None if self.state.mapper_status == MapperStatus::Loaded => {
                warn!(%file, "file not listed in mapper");
                self.status_message = Some(format!("{} is not listed in the mapper", file));
            }
            _ => {
                if self.state.mapper_status != MapperStatus::Fallback {
                    self.status_message = None;
                }
            }
        }

        let request_id = self.state.next_request_id();
        info!(%file, request_id, "loading tool output");
        self.apply(StateEvent::FileRequested {
            file: file.clone(),
            request_id,
        });
        self.fetcher.spawn_file_load(request_id, file);
    }

    fn process_fetch_messages(&mut self) {
        for message in self.fetcher.poll() {
            match message {
                FetchMessage::Mapper(Ok(mapper)) => {
                    if mapper.is_empty() {
                        warn!("mapper lists no tools");
                    } else {
                        info!(tools = mapper.len(), "mapper loaded");
                    }
                    self.apply(StateEvent::MapperLoaded(mapper));
                }
                FetchMessage::Mapper(Err(err)) => {
                    warn!(error = %err, "mapper unavailable, using fallback file list");
                    self.status_message = Some(FALLBACK_NOTICE.to_string());
                    self.apply(StateEvent::MapperFailed {
                        fallback: self.fallback_files.clone(),
                    });
                }
                FetchMessage::ToolOutput {
                    file,
                    request_id,
                    result,
                } => {
                    if !self.state.is_current(request_id) {
                        debug!(%file, request_id, latest = self.state.latest_request, "dropping stale response");
                        continue;
                    }
                    match result {
                        Ok(body) => {
                            info!(%file, request_id, "tool output loaded");
                            self.error = None;
                            self.apply(StateEvent::FileLoaded {
                                file,
                                request_id,
                                body,
                            });
                        }
                        Err(err) => {
                            warn!(%file, error = %err, "tool output failed to load");
                            self.error = Some(format!("Could not load {}: {}", file, err));
                            self.apply(StateEvent::FileFailed { file, request_id });
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::model::mapper::MAPPER_FILE;
    use crate::components::home::rendering_label;
    use crate::model::view::ViewKind;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::thread;
    use std::time::{Duration, Instant};

    struct MemorySource(HashMap<String, Value>);

    impl ToolOutputSource for MemorySource {
        fn fetch(&self, name: &str) -> Result<Value, FetchError> {
            self.0.get(name).cloned().ok_or_else(|| FetchError::Io {
                path: name.into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn app(files: Vec<(&str, Value)>) -> App {
        let source = MemorySource(files.into_iter().map(|(k, v)| (k.to_string(), v)).collect());
        let mut app = App::new(&Config::default(), Arc::new(source), None);
        app.init().unwrap();
        app
    }

    fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) && Instant::now() < deadline {
            app.update(Action::Tick).unwrap();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(done(app), "condition not reached before deadline");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app.handle_key_event(key(code)).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn mapped_app() -> App {
        app(vec![
            (
                MAPPER_FILE,
                json!({
                    "products": {"list": "ProductList"},
                    "orders": {"list": "ChannelOrdersList"},
                    "bogus": {"list": "Bogus"}
                }),
            ),
            ("products.json", json!({"products": [{"title": "Mug"}]})),
            (
                "orders.json",
                json!({"orders": [
                    {"order_id": "A-1", "channel_name": "Amazon", "marketplace_account_id": "m1"},
                    {"order_id": "T-1", "channel_name": "TikTok", "marketplace_account_id": "m2"}
                ]}),
            ),
            ("bogus.json", json!({"data": []})),
        ])
    }

    #[test]
    fn test_mapper_populates_file_list() {
        let mut app = mapped_app();
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);
        assert_eq!(app.state.files, vec!["products.json", "orders.json", "bogus.json"]);
        assert_eq!(app.file_selector.highlighted(), Some("products.json"));
    }

    #[test]
    fn test_missing_mapper_falls_back() {
        let mut app = app(Vec::new());
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Fallback);
        assert_eq!(app.state.files, Config::default().fallback_files);
        assert_eq!(app.status_message.as_deref(), Some(FALLBACK_NOTICE));
    }

    #[test]
    fn test_load_renders_mapped_view() {
        let mut app = mapped_app();
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.pending_file.as_deref(), Some("products.json"));
        tick_until(&mut app, |a| a.state.dataset.is_some());

        assert_eq!(app.view_panel.active_kind(), Some(ViewKind::ProductList));
        assert!(app.state.pending_file.is_none());
    }

    #[test]
    fn test_unregistered_component_has_no_view() {
        let mut app = mapped_app();
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);

        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Enter);
        tick_until(&mut app, |a| a.state.dataset.is_some());

        assert_eq!(app.state.active.as_ref().map(|c| c.name.as_str()), Some("Bogus"));
        assert!(app.view_panel.active_kind().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut app = app(vec![
            (MAPPER_FILE, json!({"products": {"list": "ProductTable"}, "gone": {"list": "ProductTable"}})),
            ("products.json", json!({"products": []})),
        ]);
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);
        press(&mut app, KeyCode::Enter);
        tick_until(&mut app, |a| a.state.dataset.is_some());

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        tick_until(&mut app, |a| a.error.is_some());

        assert_eq!(app.state.dataset_file.as_deref(), Some("products.json"));
        assert!(app.state.pending_file.is_none());
    }

    fn header_label(app: &App) -> Option<String> {
        let ctx = render_context(&app.state, None, None, None, app.focus);
        rendering_label(ctx.view_name, ctx.rendered_file)
    }

    #[test]
    fn test_header_names_rendered_file_after_failed_load() {
        let mut app = app(vec![
            (MAPPER_FILE, json!({"products": {"list": "ProductTable"}, "gone": {"list": "ProductTable"}})),
            ("products.json", json!({"products": []})),
        ]);
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);
        press(&mut app, KeyCode::Enter);
        tick_until(&mut app, |a| a.state.dataset.is_some());
        assert_eq!(header_label(&app).as_deref(), Some("Rendering: ProductTable for products.json"));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.pending_file.as_deref(), Some("gone.json"));
        assert_eq!(header_label(&app).as_deref(), Some("Rendering: ProductTable for products.json"));

        tick_until(&mut app, |a| a.error.is_some());
        assert_eq!(header_label(&app).as_deref(), Some("Rendering: ProductTable for products.json"));
    }

    #[test]
    fn test_channel_picker_switches_orders_channel() {
        let mut app = mapped_app();
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        tick_until(&mut app, |a| a.state.dataset.is_some());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.modals.top(), Some(Modal::ChannelPicker));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.view_panel.channel_options().and_then(|(_, i)| i), Some(1));
    }

    #[test]
    fn test_search_mode_swallows_quit_key() {
        let mut app = mapped_app();
        tick_until(&mut app, |a| a.state.mapper_status == MapperStatus::Loaded);
        press(&mut app, KeyCode::Enter);
        tick_until(&mut app, |a| a.state.dataset.is_some());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }
}
