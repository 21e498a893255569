//! Which side-panel form a key opens in each section.

use rackview_core::model::{DiscoveryId, SystemId};
use rackview_core::panel::{
    ControllerPanel, DashboardPanel, DevicePanel, DomainPanel, KvmPanel, MachinePanel, NodeAction, SubnetPanel,
    TagPanel, ZonePanel,
};
use rackview_core::{PanelContent, Section};

use crate::data::inventory::{Inventory, NodeStatus, RowKey};
use crate::data::keybindings_data::{KeybindingsConfig, PanelBindings};
use crate::event::AppKeyEvent;

/// Rows a form acts on, and where the key was pressed.
pub struct Targets<'a> {
    pub rows: &'a [RowKey],
    /// Row under the cursor on a list page
    pub cursor: Option<&'a RowKey>,
    /// On a resource's own page rather than the list
    pub on_details: bool,
}

impl Targets<'_> {
    fn nodes(&self) -> Vec<SystemId> {
        self.rows
            .iter()
            .filter_map(|key| match key {
                RowKey::Node(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    fn first<T>(&self, pick: impl Fn(&RowKey) -> Option<T>) -> Option<T> {
        self.rows.iter().find_map(pick)
    }
}

/// `Ok(None)` when the key opens nothing here; `Err` when it would, but the
/// selection has nothing it can act on.
pub fn panel_for_key(
    section: Section,
    key: &AppKeyEvent,
    bindings: &PanelBindings,
    targets: &Targets<'_>,
    inventory: &Inventory,
) -> Result<Option<PanelContent>, &'static str> {
    let m = |keys: &[String]| KeybindingsConfig::matches(key, keys);

    match section {
        Section::Machines => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Machine(MachinePanel::Add)));
            }
            if m(&bindings.add_secondary) {
                return Ok(Some(PanelContent::Machine(MachinePanel::AddChassis)));
            }
            if m(&bindings.clone) {
                let Some(RowKey::Node(source)) = targets.cursor else {
                    return Err(CLONE_HINT);
                };
                let machines: Vec<_> = targets
                    .nodes()
                    .into_iter()
                    .filter(|id| id != source)
                    .collect();
                if machines.is_empty() {
                    return Err(CLONE_HINT);
                }
                return Ok(Some(PanelContent::Machine(MachinePanel::Clone {
                    source: source.clone(),
                    machines,
                })));
            }
            let Some(action) = node_action(section, &m, bindings, targets, inventory) else {
                return Ok(None);
            };
            let machines = targets.nodes();
            if machines.is_empty() {
                return Err("Select a machine first");
            }
            Ok(Some(PanelContent::Machine(MachinePanel::Action {
                action,
                machines,
            })))
        }
        Section::Controllers => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Controller(ControllerPanel::Add)));
            }
            let Some(action) = node_action(section, &m, bindings, targets, inventory)
                .filter(|action| NodeAction::CONTROLLER.contains(action))
            else {
                return Ok(None);
            };
            let controllers = targets.nodes();
            if controllers.is_empty() {
                return Err("Select a controller first");
            }
            Ok(Some(PanelContent::Controller(ControllerPanel::Action {
                action,
                controllers,
            })))
        }
        Section::Devices => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Device(DevicePanel::Add)));
            }
            let devices = targets.nodes();
            let panel = if m(&bindings.set_zone) {
                DevicePanel::SetZone { devices }
            } else if m(&bindings.delete) {
                DevicePanel::Delete { devices }
            } else {
                return Ok(None);
            };
            if targets.rows.is_empty() {
                return Err("Select a device first");
            }
            Ok(Some(PanelContent::Device(panel)))
        }
        Section::Kvm => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Kvm(KvmPanel::AddLxd)));
            }
            if m(&bindings.add_secondary) {
                return Ok(Some(PanelContent::Kvm(KvmPanel::AddVirsh)));
            }
            let hosts: Vec<_> = targets
                .rows
                .iter()
                .filter_map(|key| match key {
                    RowKey::Kvm(id) => Some(*id),
                    _ => None,
                })
                .collect();
            let panel = if m(&bindings.edit) {
                hosts.first().map(|host| KvmPanel::Compose { host: *host })
            } else if m(&bindings.refresh) {
                (!hosts.is_empty()).then(|| KvmPanel::Refresh {
                    hosts: hosts.clone(),
                })
            } else if m(&bindings.delete) {
                hosts.first().map(|host| KvmPanel::Delete { host: *host })
            } else {
                return Ok(None);
            };
            panel
                .map(|panel| Some(PanelContent::Kvm(panel)))
                .ok_or("Select a KVM host first")
        }
        Section::Networks => {
            let panel = if m(&bindings.add) {
                SubnetPanel::AddSubnet
            } else if m(&bindings.add_secondary) {
                SubnetPanel::AddVlan
            } else if m(&bindings.add_fabric) {
                SubnetPanel::AddFabric
            } else if m(&bindings.add_space) {
                SubnetPanel::AddSpace
            } else if m(&bindings.edit) {
                // VLANs are edited; subnets get a reserved range
                targets
                    .first(|key| match key {
                        RowKey::Vlan(vlan) => Some(SubnetPanel::EditVlan { vlan: *vlan }),
                        RowKey::Subnet(subnet) => {
                            Some(SubnetPanel::ReserveRange { subnet: *subnet })
                        }
                        _ => None,
                    })
                    .ok_or("Select a VLAN or subnet first")?
            } else if m(&bindings.delete) {
                targets
                    .first(|key| match key {
                        RowKey::Subnet(subnet) => {
                            Some(SubnetPanel::DeleteSubnet { subnet: *subnet })
                        }
                        _ => None,
                    })
                    .ok_or("Select a subnet first")?
            } else {
                return Ok(None);
            };
            Ok(Some(PanelContent::Subnet(panel)))
        }
        Section::Tags => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Tag(TagPanel::Add)));
            }
            let tag = targets.first(|key| match key {
                RowKey::Tag(tag) => Some(*tag),
                _ => None,
            });
            let panel = if m(&bindings.edit) {
                tag.map(|tag| TagPanel::Update { tag })
            } else if m(&bindings.delete) {
                tag.map(|tag| TagPanel::Delete {
                    tag,
                    from_details: targets.on_details,
                })
            } else {
                return Ok(None);
            };
            panel
                .map(|panel| Some(PanelContent::Tag(panel)))
                .ok_or("Select a tag first")
        }
        Section::Zones => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Zone(ZonePanel::Add)));
            }
            if !m(&bindings.delete) {
                return Ok(None);
            }
            targets
                .first(|key| match key {
                    RowKey::Zone(zone) => Some(*zone),
                    _ => None,
                })
                .map(|zone| Some(PanelContent::Zone(ZonePanel::Delete { zone })))
                .ok_or("Select an AZ first")
        }
        Section::Domains => {
            if m(&bindings.add) {
                return Ok(Some(PanelContent::Domain(DomainPanel::Add)));
            }
            let domain = targets.first(|key| match key {
                RowKey::Domain(domain) => Some(*domain),
                _ => None,
            });
            let panel = if m(&bindings.add_secondary) {
                domain.map(|domain| DomainPanel::AddRecord { domain })
            } else if m(&bindings.set_default) {
                domain.map(|domain| DomainPanel::SetDefault { domain })
            } else if m(&bindings.delete) {
                domain.map(|domain| DomainPanel::Delete { domain })
            } else {
                return Ok(None);
            };
            panel
                .map(|panel| Some(PanelContent::Domain(panel)))
                .ok_or("Select a domain first")
        }
        Section::Dashboard => {
            if m(&bindings.clear_all) {
                return Ok(Some(PanelContent::Dashboard(DashboardPanel::ClearAll)));
            }
            let discoveries: Vec<DiscoveryId> = targets
                .rows
                .iter()
                .filter_map(|key| match key {
                    RowKey::Discovery(id) => Some(*id),
                    _ => None,
                })
                .collect();
            let panel = if m(&bindings.add) {
                discoveries
                    .first()
                    .map(|discovery| DashboardPanel::AddDevice {
                        discovery: *discovery,
                    })
            } else if m(&bindings.delete) {
                (!discoveries.is_empty()).then(|| DashboardPanel::Delete {
                    discoveries: discoveries.clone(),
                })
            } else {
                return Ok(None);
            };
            panel
                .map(|panel| Some(PanelContent::Dashboard(panel)))
                .ok_or("Select a discovery first")
        }
        Section::Intro => Ok(None),
    }
}

const CLONE_HINT: &str = "Select the machines to clone to, then put the cursor on the source";

/// Bulk node action bound to the key, if any. Lock and broken toggle on the
/// state of the first target.
fn node_action(
    section: Section,
    m: &impl Fn(&[String]) -> bool,
    bindings: &PanelBindings,
    targets: &Targets<'_>,
    inventory: &Inventory,
) -> Option<NodeAction> {
    let first = targets.nodes().into_iter().next().and_then(|id| {
        inventory
            .nodes(section)
            .iter()
            .find(|node| node.id == id)
            .cloned()
    });

    let direct = [
        (&bindings.commission, NodeAction::Commission),
        (&bindings.deploy, NodeAction::Deploy),
        (&bindings.release, NodeAction::Release),
        (&bindings.abort, NodeAction::Abort),
        (&bindings.test, NodeAction::Test),
        (&bindings.rescue, NodeAction::Rescue),
        (&bindings.power_on, NodeAction::PowerOn),
        (&bindings.power_off, NodeAction::PowerOff),
        (&bindings.set_zone, NodeAction::SetZone),
        (&bindings.tag, NodeAction::Tag),
        (&bindings.delete, NodeAction::Delete),
    ];
    if let Some((_, action)) = direct.iter().find(|(keys, _)| m(keys.as_slice())) {
        return Some(*action);
    }

    if m(&bindings.lock) {
        return Some(match first {
            Some(node) if node.locked => NodeAction::Unlock,
            _ => NodeAction::Lock,
        });
    }
    if m(&bindings.broken) {
        return Some(match first {
            Some(node) if node.status == NodeStatus::Broken => NodeAction::MarkFixed,
            _ => NodeAction::MarkBroken,
        });
    }
    None
}
