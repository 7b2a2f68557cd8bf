//! Presentation state shared by the layout

/// Pane receiving navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Files,
    View,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Files => Focus::View,
            Focus::View => Focus::Files,
        }
    }
}
