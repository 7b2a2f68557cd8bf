//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod attribute_list;
pub mod channel_list;
pub mod channel_orders_list;
pub mod channel_picker;
pub mod classification_list;
pub mod file_selector;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod listing_frame;
pub mod product_card;
pub mod product_list;
pub mod product_table;
pub mod quit_dialog;
pub mod table;
pub mod view_panel;
pub mod warehouse_list;

pub use channel_picker::ChannelPicker;
pub use file_selector::FileSelector;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use view_panel::ViewPanel;
