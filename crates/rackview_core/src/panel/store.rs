//! The single side-panel slot.
//!
//! [`PanelStore`] is a cheap, cloneable reference to one shared slot. The root
//! of the application creates it once and hands out [`SidePanel`] handles via
//! the controller; writes only happen through those handles.
//!
//! [`SidePanel`]: super::SidePanel

use std::cell::RefCell;
use std::rc::Rc;

use super::PanelContent;

#[derive(Debug, Default)]
struct PanelSlot {
    content: Option<PanelContent>,
    /// Bumped on every write; the app redraws when it moves during a commit.
    revision: u64,
    consumers: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PanelStore {
    slot: Rc<RefCell<PanelSlot>>,
}

impl PanelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current panel payload, if a panel is open.
    pub fn content(&self) -> Option<PanelContent> {
        self.slot.borrow().content.clone()
    }

    pub fn is_open(&self) -> bool {
        self.slot.borrow().content.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.slot.borrow().revision
    }

    /// Number of live consumer handles bound to this slot.
    pub fn consumers(&self) -> usize {
        self.slot.borrow().consumers
    }

    /// Replace the payload unconditionally. Last writer wins.
    pub(crate) fn set_content(&self, content: Option<PanelContent>) {
        let mut slot = self.slot.borrow_mut();
        match &content {
            Some(next) => tracing::debug!(view = %next.view(), "side panel opened"),
            None if slot.content.is_some() => tracing::debug!("side panel closed"),
            None => {}
        }
        slot.content = content;
        slot.revision += 1;
    }

    pub(crate) fn attach(&self) {
        self.slot.borrow_mut().consumers += 1;
    }

    pub(crate) fn detach(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.consumers = slot.consumers.saturating_sub(1);
    }
}
