//! Terminal key events, reduced to what keybinding matching needs.

pub use crossterm::event::KeyCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppKeyEvent {
    pub code: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl AppKeyEvent {
    /// A key with no modifiers held.
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub fn no_modifiers(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    /// Shift+Tab, however the terminal reports it.
    pub fn is_back_tab(&self) -> bool {
        matches!(self.code, KeyCode::BackTab) || (self.code == KeyCode::Tab && self.shift)
    }
}

impl From<crossterm::event::KeyEvent> for AppKeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            code: event.code,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        }
    }
}
