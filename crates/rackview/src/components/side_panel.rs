//! Root-level side-panel chrome.
//!
//! Renders whatever the slot holds, and confirms or dismisses it. The chrome
//! is itself a consumer of the slot, so it also closes the panel when the
//! location changes.

use rackview_core::panel::{
    ControllerPanel, DashboardPanel, DevicePanel, DomainPanel, KvmPanel, MachinePanel,
    SubnetPanel, TagPanel, ZonePanel,
};
use rackview_core::model::SystemId;
use rackview_core::{AppPath, Effect, PanelContent, PanelController, Section, SidePanel};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use super::{Component, EventResult};
use crate::actions::{self, ActionResult};
use crate::data::inventory::Inventory;
use crate::data::keybindings_data::KeybindingsConfig;
use crate::event::AppKeyEvent;
use crate::state::AppState;
use crate::util::styles::{HEADER_COLOR, HELP_COLOR, focused_block_with_help};

pub struct SidePanelChrome {
    panel: SidePanel,
}

impl SidePanelChrome {
    pub fn new(controller: &PanelController, location: &AppPath) -> Self {
        Self {
            panel: controller.use_side_panel("panel-chrome", location),
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// Columns the open panel wants, or 0 when closed.
    pub fn width(&self) -> u16 {
        self.panel.content().map_or(0, |content| content.size().columns())
    }

    /// Close the panel if the location moved since the last check. Run
    /// before drawing so a panel opened elsewhere is never painted here.
    pub fn sync_location(&mut self, location: &AppPath) {
        self.panel.sync_location(location);
    }

    /// Apply a deferred panel write.
    pub fn set_content(&self, content: Option<PanelContent>) {
        self.panel.set_content(content);
    }

    fn confirm(&self, content: &PanelContent, state: &mut AppState) {
        match actions::apply_panel(content, &mut state.inventory) {
            ActionResult::Applied { summary, navigate } => {
                state.clear_error();
                state.set_status(summary);
                state.effects.defer(Effect::close_panel());
                if let Some(path) = navigate {
                    state.go_to(path);
                }
            }
            ActionResult::Error(msg) => state.set_error(msg),
        }
    }
}

impl Component for SidePanelChrome {
    fn handle_key(&mut self, key: &AppKeyEvent, state: &mut AppState) -> EventResult {
        let Some(content) = self.panel.content() else {
            return EventResult::NotHandled;
        };

        let nav = &state.keybindings.navigation;
        if KeybindingsConfig::matches(key, &nav.confirm) {
            self.confirm(&content, state);
            EventResult::Handled
        } else if KeybindingsConfig::matches(key, &nav.cancel) {
            self.panel.close();
            state.clear_error();
            EventResult::Handled
        } else {
            EventResult::NotHandled
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(content) = self.panel.content() else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                content.view().to_string(),
                Style::default().fg(HELP_COLOR),
            )),
            Line::from(""),
        ];
        lines.extend(describe(&content, &state.inventory));

        let block = focused_block_with_help(
            &format!(" {} ", content.title()),
            true,
            "Enter: confirm | Esc: cancel",
        );

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn commit(&mut self, state: &mut AppState) {
        self.sync_location(state.current_path());
    }
}

/// Body text of a form: what it acts on and what confirming does.
fn describe(content: &PanelContent, inventory: &Inventory) -> Vec<Line<'static>> {
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let nodes = |section: Section, ids: &[SystemId]| -> Vec<Line<'static>> {
        inventory
            .nodes(section)
            .iter()
            .filter(|n| ids.contains(&n.id))
            .map(|n| Line::from(format!("  {} ({})", n.hostname, n.status.label())))
            .collect()
    };

    let mut lines = Vec::new();
    match content {
        PanelContent::Machine(MachinePanel::Action { machines, .. }) => {
            lines.push(heading("Machines"));
            lines.extend(nodes(Section::Machines, machines));
        }
        PanelContent::Machine(MachinePanel::Clone { source, machines }) => {
            if let Some(node) = inventory.machines.iter().find(|m| m.id == *source) {
                lines.push(heading("Source"));
                lines.push(Line::from(format!(
                    "  {} ({}, {})",
                    node.hostname,
                    node.interfaces.join(" "),
                    node.storage_layout
                )));
            }
            lines.push(heading("Machines"));
            lines.extend(nodes(Section::Machines, machines));
        }
        PanelContent::Controller(ControllerPanel::Action { controllers, .. }) => {
            lines.push(heading("Controllers"));
            lines.extend(nodes(Section::Controllers, controllers));
        }
        PanelContent::Device(DevicePanel::SetZone { devices } | DevicePanel::Delete { devices }) => {
            lines.push(heading("Devices"));
            lines.extend(nodes(Section::Devices, devices));
        }
        PanelContent::Machine(MachinePanel::Add | MachinePanel::AddChassis)
        | PanelContent::Controller(ControllerPanel::Add)
        | PanelContent::Device(DevicePanel::Add) => {
            lines.push(Line::from("New nodes enlist with generated hostnames."));
        }
        PanelContent::Kvm(KvmPanel::Compose { host } | KvmPanel::Delete { host }) => {
            if let Some(kvm) = inventory.kvm_hosts.iter().find(|h| h.id == *host) {
                lines.push(heading("Host"));
                lines.push(Line::from(format!("  {} ({} VMs)", kvm.name, kvm.vms)));
            }
        }
        PanelContent::Kvm(KvmPanel::Refresh { hosts }) => {
            lines.push(heading("Hosts"));
            lines.extend(
                inventory
                    .kvm_hosts
                    .iter()
                    .filter(|h| hosts.contains(&h.id))
                    .map(|h| Line::from(format!("  {}", h.name))),
            );
        }
        PanelContent::Subnet(
            SubnetPanel::ReserveRange { subnet } | SubnetPanel::DeleteSubnet { subnet },
        ) => {
            if let Some(s) = inventory.subnets.iter().find(|s| s.id == *subnet) {
                lines.push(heading("Subnet"));
                lines.push(Line::from(format!("  {}", s.cidr)));
            }
        }
        PanelContent::Subnet(SubnetPanel::EditVlan { vlan }) => {
            if let Some(v) = inventory.vlans.iter().find(|v| v.id == *vlan) {
                lines.push(heading("VLAN"));
                let dhcp = if v.dhcp_on { "on" } else { "off" };
                lines.push(Line::from(format!("  {} (vid {}, DHCP {dhcp})", v.name, v.vid)));
            }
        }
        PanelContent::Tag(TagPanel::Update { tag } | TagPanel::Delete { tag, .. }) => {
            if let Some(t) = inventory.tags.iter().find(|t| t.id == *tag) {
                lines.push(heading("Tag"));
                lines.push(Line::from(format!("  {}", t.name)));
            }
        }
        PanelContent::Zone(ZonePanel::Delete { zone }) => {
            if let Some(z) = inventory.zones.iter().find(|z| z.id == *zone) {
                lines.push(heading("AZ"));
                lines.push(Line::from(format!("  {}", z.name)));
            }
        }
        PanelContent::Domain(
            DomainPanel::AddRecord { domain }
            | DomainPanel::SetDefault { domain }
            | DomainPanel::Delete { domain },
        ) => {
            if let Some(d) = inventory.domains.iter().find(|d| d.id == *domain) {
                lines.push(heading("Domain"));
                lines.push(Line::from(format!("  {}", d.name)));
            }
        }
        PanelContent::Dashboard(DashboardPanel::ClearAll) => {
            lines.push(Line::from(format!(
                "Forget {} seen on the network.",
                actions::plural(inventory.discoveries.len(), "discovery")
            )));
        }
        PanelContent::Dashboard(
            DashboardPanel::AddDevice {
                discovery: discovery_id,
            },
        ) => {
            lines.push(heading("Discovery"));
            lines.extend(
                inventory
                    .discoveries
                    .iter()
                    .filter(|d| d.id == *discovery_id)
                    .map(|d| Line::from(format!("  {} {}", d.mac, d.ip))),
            );
        }
        PanelContent::Dashboard(DashboardPanel::Delete { discoveries }) => {
            lines.push(heading("Discoveries"));
            lines.extend(
                inventory
                    .discoveries
                    .iter()
                    .filter(|d| discoveries.contains(&d.id))
                    .map(|d| Line::from(format!("  {} {}", d.mac, d.ip))),
            );
        }
        PanelContent::Kvm(KvmPanel::AddLxd | KvmPanel::AddVirsh)
        | PanelContent::Subnet(
            SubnetPanel::AddSubnet
            | SubnetPanel::AddVlan
            | SubnetPanel::AddFabric
            | SubnetPanel::AddSpace,
        )
        | PanelContent::Tag(TagPanel::Add)
        | PanelContent::Zone(ZonePanel::Add)
        | PanelContent::Domain(DomainPanel::Add) => {
            lines.push(Line::from("A name is generated on confirm."));
        }
    }
    lines
}
