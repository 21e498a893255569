pub mod nav_bar;
pub mod side_panel;
pub mod status_bar;

use ratatui::{Frame, layout::Rect};

use crate::event::AppKeyEvent;
use crate::state::AppState;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    /// Event was handled, continue
    Handled,
    /// Event was not handled, pass to parent
    NotHandled,
    /// Request app exit
    Exit,
}

/// Trait for components that can handle input and render
pub trait Component {
    /// Handle a key event
    fn handle_key(&mut self, key: &AppKeyEvent, state: &mut AppState) -> EventResult;

    /// Render the component. Must not change anything outside `self`.
    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Runs once the frame is drawn; register deferred effects here.
    fn commit(&mut self, _state: &mut AppState) {}
}
