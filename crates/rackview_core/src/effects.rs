//! Deferred side effects.
//!
//! Rendering never writes state. Anything a render pass decides (a redirect,
//! a panel change) is registered here and applied after the frame is drawn,
//! in the order it was registered.

use std::collections::VecDeque;

use crate::intro::NavigationDecision;
use crate::model::AppPath;
use crate::panel::PanelContent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the side-panel payload.
    SetPanel(Option<PanelContent>),
    /// Navigate; `replace` swaps the current history entry instead of pushing.
    Navigate { to: AppPath, replace: bool },
}

impl Effect {
    pub fn close_panel() -> Self {
        Effect::SetPanel(None)
    }

    pub fn open_panel(content: PanelContent) -> Self {
        Effect::SetPanel(Some(content))
    }

    pub fn push(to: impl Into<AppPath>) -> Self {
        Effect::Navigate {
            to: to.into(),
            replace: false,
        }
    }
}

/// FIFO of effects awaiting the commit phase.
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: VecDeque<Effect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, effect: Effect) {
        self.pending.push_back(effect);
    }

    /// Register the navigation a guard decided on, if any.
    pub fn defer_navigation(&mut self, decision: &NavigationDecision) {
        if let NavigationDecision::RedirectTo { path, replace } = decision {
            self.defer(Effect::Navigate {
                to: path.clone(),
                replace: *replace,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending effect in registration order.
    pub fn drain(&mut self) -> impl Iterator<Item = Effect> + '_ {
        self.pending.drain(..)
    }
}
