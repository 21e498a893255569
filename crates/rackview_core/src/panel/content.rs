//! Panel payloads contributed by each feature area.
//!
//! Every form the console can open in its side panel is one variant of
//! [`PanelContent`]. A feature area owns its inner enum (for example
//! [`TagPanel`]) and only the top-level enum knows about all of them, so adding
//! a form touches one feature enum and nothing else. Downstream code matches on
//! the enum; [`PanelView`] is the flat tag used for logging and lookups.

use std::fmt;

use crate::model::{
    DiscoveryId, DomainId, KvmHostId, Section, SubnetId, SystemId, TagId, VlanId, ZoneId,
};

/// Discriminant of a panel variant: owning section plus form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelView {
    pub section: Section,
    pub form: &'static str,
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.form)
    }
}

/// Width class of the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelSize {
    Narrow,
    #[default]
    Regular,
    Wide,
}

impl PanelSize {
    /// Column width of the panel in a terminal.
    pub fn columns(&self) -> u16 {
        match self {
            PanelSize::Narrow => 40,
            PanelSize::Regular => 56,
            PanelSize::Wide => 80,
        }
    }
}

/// Bulk lifecycle actions on machines and controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeAction {
    Commission,
    Deploy,
    Release,
    Abort,
    Test,
    Rescue,
    PowerOn,
    PowerOff,
    Lock,
    Unlock,
    MarkBroken,
    MarkFixed,
    SetZone,
    Tag,
    Delete,
}

impl NodeAction {
    pub const ALL: [NodeAction; 15] = [
        NodeAction::Commission,
        NodeAction::Deploy,
        NodeAction::Release,
        NodeAction::Abort,
        NodeAction::Test,
        NodeAction::Rescue,
        NodeAction::PowerOn,
        NodeAction::PowerOff,
        NodeAction::Lock,
        NodeAction::Unlock,
        NodeAction::MarkBroken,
        NodeAction::MarkFixed,
        NodeAction::SetZone,
        NodeAction::Tag,
        NodeAction::Delete,
    ];

    /// Actions a controller accepts.
    pub const CONTROLLER: [NodeAction; 6] = [
        NodeAction::Test,
        NodeAction::PowerOn,
        NodeAction::PowerOff,
        NodeAction::SetZone,
        NodeAction::Tag,
        NodeAction::Delete,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            NodeAction::Commission => "commission",
            NodeAction::Deploy => "deploy",
            NodeAction::Release => "release",
            NodeAction::Abort => "abort",
            NodeAction::Test => "test",
            NodeAction::Rescue => "rescue",
            NodeAction::PowerOn => "power-on",
            NodeAction::PowerOff => "power-off",
            NodeAction::Lock => "lock",
            NodeAction::Unlock => "unlock",
            NodeAction::MarkBroken => "mark-broken",
            NodeAction::MarkFixed => "mark-fixed",
            NodeAction::SetZone => "set-zone",
            NodeAction::Tag => "tag",
            NodeAction::Delete => "delete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeAction::Commission => "Commission",
            NodeAction::Deploy => "Deploy",
            NodeAction::Release => "Release",
            NodeAction::Abort => "Abort actions for",
            NodeAction::Test => "Test",
            NodeAction::Rescue => "Enter rescue mode for",
            NodeAction::PowerOn => "Power on",
            NodeAction::PowerOff => "Power off",
            NodeAction::Lock => "Lock",
            NodeAction::Unlock => "Unlock",
            NodeAction::MarkBroken => "Mark broken",
            NodeAction::MarkFixed => "Mark fixed",
            NodeAction::SetZone => "Set zone for",
            NodeAction::Tag => "Tag",
            NodeAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachinePanel {
    Add,
    AddChassis,
    Action {
        action: NodeAction,
        machines: Vec<SystemId>,
    },
    /// Copy network and storage configuration from `source` onto `machines`.
    Clone {
        source: SystemId,
        machines: Vec<SystemId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerPanel {
    Add,
    Action {
        action: NodeAction,
        controllers: Vec<SystemId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevicePanel {
    Add,
    SetZone { devices: Vec<SystemId> },
    Delete { devices: Vec<SystemId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvmPanel {
    AddLxd,
    AddVirsh,
    Compose { host: KvmHostId },
    Refresh { hosts: Vec<KvmHostId> },
    Delete { host: KvmHostId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubnetPanel {
    AddSubnet,
    AddVlan,
    AddFabric,
    AddSpace,
    EditVlan { vlan: VlanId },
    ReserveRange { subnet: SubnetId },
    DeleteSubnet { subnet: SubnetId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPanel {
    Add,
    Update { tag: TagId },
    /// `from_details` records whether deletion started on the tag's own page,
    /// which decides where the console lands afterwards.
    Delete { tag: TagId, from_details: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZonePanel {
    Add,
    Delete { zone: ZoneId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPanel {
    Add,
    AddRecord { domain: DomainId },
    SetDefault { domain: DomainId },
    Delete { domain: DomainId },
}

/// Forms of the network discovery dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardPanel {
    ClearAll,
    /// Promote a discovery to a device in the inventory
    AddDevice { discovery: DiscoveryId },
    Delete { discoveries: Vec<DiscoveryId> },
}

/// The payload of the side panel. `None` in the slot means no panel is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Machine(MachinePanel),
    Controller(ControllerPanel),
    Device(DevicePanel),
    Kvm(KvmPanel),
    Subnet(SubnetPanel),
    Tag(TagPanel),
    Zone(ZonePanel),
    Domain(DomainPanel),
    Dashboard(DashboardPanel),
}

impl PanelContent {
    pub fn section(&self) -> Section {
        match self {
            PanelContent::Machine(_) => Section::Machines,
            PanelContent::Controller(_) => Section::Controllers,
            PanelContent::Device(_) => Section::Devices,
            PanelContent::Kvm(_) => Section::Kvm,
            PanelContent::Subnet(_) => Section::Networks,
            PanelContent::Tag(_) => Section::Tags,
            PanelContent::Zone(_) => Section::Zones,
            PanelContent::Domain(_) => Section::Domains,
            PanelContent::Dashboard(_) => Section::Dashboard,
        }
    }

    pub fn view(&self) -> PanelView {
        let form = match self {
            PanelContent::Machine(panel) => match panel {
                MachinePanel::Add => "add-machine",
                MachinePanel::AddChassis => "add-chassis",
                MachinePanel::Action { action, .. } => action.slug(),
                MachinePanel::Clone { .. } => "clone",
            },
            PanelContent::Controller(panel) => match panel {
                ControllerPanel::Add => "add-controller",
                ControllerPanel::Action { action, .. } => action.slug(),
            },
            PanelContent::Device(panel) => match panel {
                DevicePanel::Add => "add-device",
                DevicePanel::SetZone { .. } => "set-zone",
                DevicePanel::Delete { .. } => "delete",
            },
            PanelContent::Kvm(panel) => match panel {
                KvmPanel::AddLxd => "add-lxd",
                KvmPanel::AddVirsh => "add-virsh",
                KvmPanel::Compose { .. } => "compose",
                KvmPanel::Refresh { .. } => "refresh",
                KvmPanel::Delete { .. } => "delete",
            },
            PanelContent::Subnet(panel) => match panel {
                SubnetPanel::AddSubnet => "add-subnet",
                SubnetPanel::AddVlan => "add-vlan",
                SubnetPanel::AddFabric => "add-fabric",
                SubnetPanel::AddSpace => "add-space",
                SubnetPanel::EditVlan { .. } => "edit-vlan",
                SubnetPanel::ReserveRange { .. } => "reserve-range",
                SubnetPanel::DeleteSubnet { .. } => "delete-subnet",
            },
            PanelContent::Tag(panel) => match panel {
                TagPanel::Add => "add-tag",
                TagPanel::Update { .. } => "update-tag",
                TagPanel::Delete { .. } => "delete-tag",
            },
            PanelContent::Zone(panel) => match panel {
                ZonePanel::Add => "add-zone",
                ZonePanel::Delete { .. } => "delete-zone",
            },
            PanelContent::Domain(panel) => match panel {
                DomainPanel::Add => "add-domain",
                DomainPanel::AddRecord { .. } => "add-record",
                DomainPanel::SetDefault { .. } => "set-default",
                DomainPanel::Delete { .. } => "delete-domain",
            },
            PanelContent::Dashboard(panel) => match panel {
                DashboardPanel::ClearAll => "clear-all-discoveries",
                DashboardPanel::AddDevice { .. } => "add-discovery",
                DashboardPanel::Delete { .. } => "delete-discovery",
            },
        };
        PanelView {
            section: self.section(),
            form,
        }
    }

    /// Heading shown at the top of the panel.
    pub fn title(&self) -> String {
        match self {
            PanelContent::Machine(MachinePanel::Add) => "Add machine".to_string(),
            PanelContent::Machine(MachinePanel::AddChassis) => "Add chassis".to_string(),
            PanelContent::Machine(MachinePanel::Action { action, machines }) => {
                node_action_title(*action, machines.len(), "machine")
            }
            PanelContent::Machine(MachinePanel::Clone { machines, .. }) => {
                format!("Clone to {}", count_noun(machines.len(), "machine"))
            }
            PanelContent::Controller(ControllerPanel::Add) => "Add controller".to_string(),
            PanelContent::Controller(ControllerPanel::Action {
                action,
                controllers,
            }) => node_action_title(*action, controllers.len(), "controller"),
            PanelContent::Device(DevicePanel::Add) => "Add device".to_string(),
            PanelContent::Device(DevicePanel::SetZone { devices }) => {
                format!("Set zone for {}", count_noun(devices.len(), "device"))
            }
            PanelContent::Device(DevicePanel::Delete { devices }) => {
                format!("Delete {}", count_noun(devices.len(), "device"))
            }
            PanelContent::Kvm(KvmPanel::AddLxd) => "Add LXD host".to_string(),
            PanelContent::Kvm(KvmPanel::AddVirsh) => "Add virsh host".to_string(),
            PanelContent::Kvm(KvmPanel::Compose { .. }) => "Compose VM".to_string(),
            PanelContent::Kvm(KvmPanel::Refresh { hosts }) => {
                format!("Refresh {}", count_noun(hosts.len(), "KVM host"))
            }
            PanelContent::Kvm(KvmPanel::Delete { .. }) => "Delete KVM host".to_string(),
            PanelContent::Subnet(SubnetPanel::AddSubnet) => "Add subnet".to_string(),
            PanelContent::Subnet(SubnetPanel::AddVlan) => "Add VLAN".to_string(),
            PanelContent::Subnet(SubnetPanel::AddFabric) => "Add fabric".to_string(),
            PanelContent::Subnet(SubnetPanel::AddSpace) => "Add space".to_string(),
            PanelContent::Subnet(SubnetPanel::EditVlan { .. }) => "Edit VLAN".to_string(),
            PanelContent::Subnet(SubnetPanel::ReserveRange { .. }) => {
                "Reserve range".to_string()
            }
            PanelContent::Subnet(SubnetPanel::DeleteSubnet { .. }) => {
                "Delete subnet".to_string()
            }
            PanelContent::Tag(TagPanel::Add) => "Create new tag".to_string(),
            PanelContent::Tag(TagPanel::Update { .. }) => "Update tag".to_string(),
            PanelContent::Tag(TagPanel::Delete { .. }) => "Delete tag".to_string(),
            PanelContent::Zone(ZonePanel::Add) => "Add AZ".to_string(),
            PanelContent::Zone(ZonePanel::Delete { .. }) => "Delete AZ".to_string(),
            PanelContent::Domain(DomainPanel::Add) => "Add domain".to_string(),
            PanelContent::Domain(DomainPanel::AddRecord { .. }) => "Add record".to_string(),
            PanelContent::Domain(DomainPanel::SetDefault { .. }) => "Set default".to_string(),
            PanelContent::Domain(DomainPanel::Delete { .. }) => "Delete domain".to_string(),
            PanelContent::Dashboard(DashboardPanel::ClearAll) => {
                "Clear all discoveries".to_string()
            }
            PanelContent::Dashboard(DashboardPanel::AddDevice { .. }) => {
                "Add discovery as device".to_string()
            }
            PanelContent::Dashboard(DashboardPanel::Delete { discoveries }) => {
                format!("Delete {}", count_noun(discoveries.len(), "discovery"))
            }
        }
    }

    pub fn size(&self) -> PanelSize {
        match self {
            PanelContent::Machine(
                MachinePanel::Add | MachinePanel::AddChassis | MachinePanel::Clone { .. },
            )
            | PanelContent::Kvm(KvmPanel::Compose { .. }) => PanelSize::Wide,
            PanelContent::Machine(MachinePanel::Action { action, .. })
            | PanelContent::Controller(ControllerPanel::Action { action, .. })
                if matches!(action, NodeAction::Deploy | NodeAction::Commission) =>
            {
                PanelSize::Wide
            }
            PanelContent::Tag(TagPanel::Delete { .. })
            | PanelContent::Zone(ZonePanel::Delete { .. })
            | PanelContent::Domain(DomainPanel::Delete { .. })
            | PanelContent::Domain(DomainPanel::SetDefault { .. })
            | PanelContent::Subnet(SubnetPanel::DeleteSubnet { .. })
            | PanelContent::Kvm(KvmPanel::Delete { .. })
            | PanelContent::Device(DevicePanel::Delete { .. })
            | PanelContent::Dashboard(DashboardPanel::ClearAll | DashboardPanel::Delete { .. }) => {
                PanelSize::Narrow
            }
            _ => PanelSize::Regular,
        }
    }
}

fn count_noun(count: usize, noun: &str) -> String {
    match (count, noun.strip_suffix('y')) {
        (1, _) => format!("1 {noun}"),
        (_, Some(stem)) => format!("{count} {stem}ies"),
        (_, None) => format!("{count} {noun}s"),
    }
}

fn node_action_title(action: NodeAction, count: usize, noun: &str) -> String {
    format!("{} {}", action.label(), count_noun(count, noun))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_action_slugs_are_unique() {
        let mut slugs: Vec<_> = NodeAction::ALL.iter().map(|a| a.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), NodeAction::ALL.len());
    }

    #[test]
    fn test_clone_and_dashboard_titles() {
        let clone = PanelContent::Machine(MachinePanel::Clone {
            source: SystemId::new("k8s7yx"),
            machines: vec![SystemId::new("a"), SystemId::new("b")],
        });
        assert_eq!(clone.title(), "Clone to 2 machines");
        assert_eq!(clone.view().to_string(), "machines:clone");
        assert_eq!(clone.size(), PanelSize::Wide);

        let clear = PanelContent::Dashboard(DashboardPanel::ClearAll);
        assert_eq!(clear.section(), Section::Dashboard);
        assert_eq!(clear.title(), "Clear all discoveries");
        assert_eq!(clear.size(), PanelSize::Narrow);
    }

    #[test]
    fn test_titles_count_selection() {
        let one = PanelContent::Machine(MachinePanel::Action {
            action: NodeAction::Deploy,
            machines: vec![SystemId::new("abc123")],
        });
        assert_eq!(one.title(), "Deploy 1 machine");

        let many = PanelContent::Device(DevicePanel::Delete {
            devices: vec![SystemId::new("a"), SystemId::new("b"), SystemId::new("c")],
        });
        assert_eq!(many.title(), "Delete 3 devices");
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(PanelContent::Machine(MachinePanel::Add).size(), PanelSize::Wide);
        assert_eq!(
            PanelContent::Tag(TagPanel::Delete {
                tag: TagId(1),
                from_details: false
            })
            .size(),
            PanelSize::Narrow
        );
        assert_eq!(PanelContent::Zone(ZonePanel::Add).size(), PanelSize::Regular);
        assert!(PanelSize::Narrow.columns() < PanelSize::Wide.columns());
    }

    #[test]
    fn test_view_display() {
        let view = PanelContent::Subnet(SubnetPanel::EditVlan { vlan: VlanId(5002) }).view();
        assert_eq!(view.to_string(), "networks:edit-vlan");
    }
}
