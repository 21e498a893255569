//! Consumer handles over the side-panel slot.
//!
//! A component that wants to open panels asks the [`PanelController`] for a
//! [`SidePanel`]. Holding the handle is holding a claim on the slot: the panel
//! is closed when the location it was opened at changes, and when the handle
//! is dropped, whatever the reason for the drop.

use crate::model::AppPath;

use super::{PanelContent, PanelStore};

/// Root-owned provider of side-panel handles.
#[derive(Debug, Default)]
pub struct PanelController {
    store: PanelStore,
}

impl PanelController {
    pub fn new() -> Self {
        Self::with_store(PanelStore::new())
    }

    /// Build a controller over an existing slot (isolated slots in tests).
    pub fn with_store(store: PanelStore) -> Self {
        Self { store }
    }

    /// Read-only view of the slot.
    pub fn store(&self) -> &PanelStore {
        &self.store
    }

    /// Bind a new consumer to the slot, observing `location` as its starting
    /// point. Mounting never closes an open panel.
    pub fn use_side_panel(&self, consumer: &'static str, location: &AppPath) -> SidePanel {
        self.store.attach();
        tracing::trace!(consumer, %location, "side panel consumer mounted");
        SidePanel {
            store: self.store.clone(),
            observed: location.clone(),
            consumer,
        }
    }
}

/// A mounted consumer's read/write handle on the side panel.
#[derive(Debug)]
pub struct SidePanel {
    store: PanelStore,
    observed: AppPath,
    consumer: &'static str,
}

impl SidePanel {
    pub fn content(&self) -> Option<PanelContent> {
        self.store.content()
    }

    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    pub fn set_content(&self, content: Option<PanelContent>) {
        self.store.set_content(content);
    }

    pub fn open(&self, content: PanelContent) {
        self.set_content(Some(content));
    }

    pub fn close(&self) {
        self.set_content(None);
    }

    /// The last location this consumer observed.
    pub fn observed(&self) -> &AppPath {
        &self.observed
    }

    /// Observe the current location. When it differs from the previously
    /// observed one the panel is closed. Returns whether a change was seen.
    pub fn sync_location(&mut self, location: &AppPath) -> bool {
        if &self.observed == location {
            return false;
        }
        tracing::debug!(
            consumer = self.consumer,
            from = %self.observed,
            to = %location,
            "location changed, closing side panel"
        );
        self.observed = location.clone();
        self.store.set_content(None);
        true
    }
}

impl Drop for SidePanel {
    fn drop(&mut self) {
        self.store.set_content(None);
        self.store.detach();
        tracing::trace!(
            consumer = self.consumer,
            remaining = self.store.consumers(),
            "side panel consumer unmounted"
        );
    }
}
