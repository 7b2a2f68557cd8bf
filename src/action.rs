//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events and the App routes
//! them to whichever component owns the affected state.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; drains background fetches
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,
    /// Switch focus between the file list and the view panel
    ToggleFocus,
    /// Load the file under the file-list cursor
    LoadSelectedFile,

    // ─────────────────────────────────────────────────────────────────────────
    // Listing
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    ToggleSort,
    /// Toggle the row under the cursor in the selection set
    ToggleRowSelection,
    /// Select every row of the current page, or clear when all are selected
    TogglePageSelection,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    OpenChannelPicker,
    CloseModal,
    ModalUp,
    ModalDown,
    /// Pick a channel by its index in the orders view's channel options
    SelectChannel(usize),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ToggleFocus => write!(f, "ToggleFocus"),
            Action::LoadSelectedFile => write!(f, "LoadSelectedFile"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::ToggleSort => write!(f, "ToggleSort"),
            Action::ToggleRowSelection => write!(f, "ToggleRowSelection"),
            Action::TogglePageSelection => write!(f, "TogglePageSelection"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenChannelPicker => write!(f, "OpenChannelPicker"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::SelectChannel(index) => write!(f, "SelectChannel({})", index),
        }
    }
}
