pub mod intro;
pub mod loading;
pub mod not_found;
mod panel_keys;
pub mod resources;

use crate::components::Component;

/// Trait for full screen views
pub trait Screen: Component {
    /// Get the screen title
    fn title(&self) -> &str;

    /// Whether the screen is taking free text, so printable keys go to it
    /// before any global binding.
    fn captures_text(&self) -> bool {
        false
    }
}
