//! Model layer - pure state and data
//!
//! - `AppState` - mapper, file list and loaded tool output, driven by a reducer
//! - record types normalized from loosely shaped JSON
//! - `ListingState` - per-view search, sort and pagination
//! - `ModalStack` - modal overlay management

pub mod channel;
pub mod format;
pub mod json;
pub mod listing;
pub mod mapper;
pub mod modal;
pub mod orders;
pub mod records;
pub mod state;
pub mod ui;
pub mod view;

pub use listing::ListingState;
pub use mapper::ComponentConfig;
pub use state::{AppState, MapperStatus, StateEvent};
pub use ui::Focus;
pub use view::Resolution;
