// Actions module - applies confirmed side-panel forms to the inventory
//
// Each feature area has its own file; `apply_panel` only dispatches on the
// panel variant.

mod dashboard;
mod network;
mod nodes;
mod organisation;

pub use dashboard::*;
pub use network::*;
pub use nodes::*;
pub use organisation::*;

use rackview_core::{AppPath, PanelContent};

use crate::data::inventory::Inventory;

/// Result of confirming a side-panel form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Form applied; the panel closes and, when `navigate` is set, the console
    /// moves there afterwards
    Applied {
        summary: String,
        navigate: Option<AppPath>,
    },
    /// Form rejected; the panel stays open
    Error(String),
}

impl ActionResult {
    /// Create a result that closes the panel
    pub fn done(summary: impl Into<String>) -> Self {
        ActionResult::Applied {
            summary: summary.into(),
            navigate: None,
        }
    }

    /// Create a result that closes the panel and then navigates
    pub fn done_then(summary: impl Into<String>, navigate: AppPath) -> Self {
        ActionResult::Applied {
            summary: summary.into(),
            navigate: Some(navigate),
        }
    }

    /// Create an error result
    pub fn error(msg: impl Into<String>) -> Self {
        ActionResult::Error(msg.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ActionResult::Error(_))
    }
}

/// Apply a confirmed panel form.
pub fn apply_panel(content: &PanelContent, inventory: &mut Inventory) -> ActionResult {
    let result = match content {
        PanelContent::Machine(panel) => apply_machine(panel, inventory),
        PanelContent::Controller(panel) => apply_controller(panel, inventory),
        PanelContent::Device(panel) => apply_device(panel, inventory),
        PanelContent::Kvm(panel) => apply_kvm(panel, inventory),
        PanelContent::Subnet(panel) => apply_subnet(panel, inventory),
        PanelContent::Tag(panel) => apply_tag(panel, inventory),
        PanelContent::Zone(panel) => apply_zone(panel, inventory),
        PanelContent::Domain(panel) => apply_domain(panel, inventory),
        PanelContent::Dashboard(panel) => apply_dashboard(panel, inventory),
    };

    match &result {
        ActionResult::Applied { summary, .. } => {
            tracing::info!(view = %content.view(), summary = %summary, "Panel applied");
        }
        ActionResult::Error(msg) => {
            tracing::warn!(view = %content.view(), error = %msg, "Panel rejected");
        }
    }
    result
}

/// "1 machine", "3 machines"
pub(crate) fn plural(count: usize, noun: &str) -> String {
    match (count, noun.strip_suffix('y')) {
        (1, _) => format!("1 {noun}"),
        (_, Some(stem)) => format!("{count} {stem}ies"),
        (_, None) => format!("{count} {noun}s"),
    }
}
