// KVM host and subnet/VLAN actions

use rackview_core::model::{KvmHostId, SubnetId, VlanId};
use rackview_core::panel::{KvmPanel, SubnetPanel};

use super::{ActionResult, plural};
use crate::data::inventory::{Inventory, KvmHost, Node, NodeStatus, Subnet, Vlan};

pub fn apply_kvm(panel: &KvmPanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        KvmPanel::AddLxd => add_host(inventory, "LXD"),
        KvmPanel::AddVirsh => add_host(inventory, "virsh"),
        KvmPanel::Compose { host } => {
            let n = inventory.next_id();
            let Some(kvm) = inventory.kvm_hosts.iter_mut().find(|h| h.id == *host) else {
                return unknown_host(*host);
            };
            kvm.vms += 1;
            let hostname = format!("{}-vm{}", kvm.name, kvm.vms);

            // Composed VMs enlist as ready machines
            let mut vm = Node::new(format!("vm{n:04x}"), hostname.clone(), NodeStatus::Ready);
            vm.tags.push("virtual".to_string());
            inventory.machines.push(vm);
            ActionResult::done(format!("Composed {hostname}"))
        }
        KvmPanel::Refresh { hosts } => {
            if hosts.is_empty() {
                return ActionResult::error("No KVM hosts selected");
            }
            if let Some(missing) = hosts
                .iter()
                .find(|id| !inventory.kvm_hosts.iter().any(|h| h.id == **id))
            {
                return unknown_host(*missing);
            }
            ActionResult::done(format!("Refreshed {}", plural(hosts.len(), "KVM host")))
        }
        KvmPanel::Delete { host } => {
            let before = inventory.kvm_hosts.len();
            inventory.kvm_hosts.retain(|h| h.id != *host);
            if inventory.kvm_hosts.len() == before {
                return unknown_host(*host);
            }
            ActionResult::done("Deleted KVM host")
        }
    }
}

fn add_host(inventory: &mut Inventory, kind: &'static str) -> ActionResult {
    let n = inventory.next_id();
    let name = format!("{}-host-{n}", kind.to_lowercase());
    inventory.kvm_hosts.push(KvmHost {
        id: KvmHostId(n),
        name: name.clone(),
        kind,
        vms: 0,
    });
    ActionResult::done(format!("Added {kind} host {name}"))
}

fn unknown_host(id: KvmHostId) -> ActionResult {
    ActionResult::error(format!("Unknown KVM host {}", id.0))
}

pub fn apply_subnet(panel: &SubnetPanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        SubnetPanel::AddSubnet => {
            let Some(vlan) = inventory.vlans.first().map(|v| v.id) else {
                return ActionResult::error("Add a VLAN first");
            };
            let n = inventory.next_id();
            let cidr = format!("10.{}.0.0/24", n % 256);
            inventory.subnets.push(Subnet {
                id: SubnetId(n),
                cidr: cidr.clone(),
                vlan,
                reserved_ranges: 0,
            });
            ActionResult::done(format!("Added subnet {cidr}"))
        }
        SubnetPanel::AddVlan => {
            let n = inventory.next_id();
            let vid = (inventory.vlans.iter().map(|v| v.vid).max().unwrap_or(0) + 1).min(4094);
            inventory.vlans.push(Vlan {
                id: VlanId(5000 + n),
                vid,
                name: format!("vlan-{vid}"),
                dhcp_on: false,
            });
            ActionResult::done(format!("Added VLAN {vid}"))
        }
        SubnetPanel::AddFabric => {
            // A new fabric comes with its own untagged VLAN
            let n = inventory.next_id();
            inventory.vlans.push(Vlan {
                id: VlanId(5000 + n),
                vid: 0,
                name: format!("fabric-{n} untagged"),
                dhcp_on: false,
            });
            ActionResult::done(format!("Added fabric-{n}"))
        }
        SubnetPanel::AddSpace => {
            let name = format!("space-{}", inventory.next_id());
            inventory.spaces.push(name.clone());
            ActionResult::done(format!("Added {name}"))
        }
        SubnetPanel::EditVlan { vlan } => {
            match inventory.vlans.iter_mut().find(|v| v.id == *vlan) {
                Some(v) => {
                    v.dhcp_on = !v.dhcp_on;
                    let state = if v.dhcp_on { "enabled" } else { "disabled" };
                    ActionResult::done(format!("DHCP {state} on VLAN {}", v.vid))
                }
                None => ActionResult::error(format!("Unknown VLAN {}", vlan.0)),
            }
        }
        SubnetPanel::ReserveRange { subnet } => {
            match inventory.subnets.iter_mut().find(|s| s.id == *subnet) {
                Some(s) => {
                    s.reserved_ranges += 1;
                    ActionResult::done(format!("Reserved a range in {}", s.cidr))
                }
                None => ActionResult::error(format!("Unknown subnet {}", subnet.0)),
            }
        }
        SubnetPanel::DeleteSubnet { subnet } => {
            let before = inventory.subnets.len();
            inventory.subnets.retain(|s| s.id != *subnet);
            if inventory.subnets.len() == before {
                return ActionResult::error(format!("Unknown subnet {}", subnet.0));
            }
            ActionResult::done("Deleted subnet")
        }
    }
}
