//! Console state core
//!
//! UI-free logic shared by every screen of the console:
//! - the single side-panel slot and its consumer handles
//! - the onboarding guard that decides which intro step is reachable
//! - the effect queue that defers navigation and panel writes past a render pass
//! - the route path model both of the above are keyed on

// ============================================================================
// Core modules
// ============================================================================

pub mod effects;
pub mod intro;
pub mod model;
pub mod panel;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use effects::{Effect, EffectQueue};
pub use intro::{IntroGuard, IntroOutcome, IntroRoutes, IntroStep, NavigationDecision, RenderChoice};
pub use model::{AppPath, Section, SessionFacts};
pub use panel::{PanelContent, PanelController, PanelSize, PanelStore, PanelView, SidePanel};
