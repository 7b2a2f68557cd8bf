//! Modal stack for overlays
//!
//! Only the top modal receives input; modals render bottom to top. Dialog
//! state (scroll position, highlighted row) lives in the dialog components.

/// A modal overlay drawn above the main layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Keyboard shortcut reference
    Help,
    /// Channel selection for the orders view
    ChannelPicker,
}

#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push `modal` unless it is already on top
    pub fn push(&mut self, modal: Modal) {
        if self.top() != Some(modal) {
            self.stack.push(modal);
        }
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<Modal> {
        self.stack.last().copied()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Modals from bottom to top, in draw order
    pub fn iter(&self) -> impl Iterator<Item = Modal> + '_ {
        self.stack.iter().copied()
    }
}
