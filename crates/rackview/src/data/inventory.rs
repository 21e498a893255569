//! In-memory inventory of the resources each section lists.
//!
//! Stands in for the backend store: screens read rows from it and confirmed
//! side-panel forms write to it through [`crate::actions`].

use rackview_core::Section;
use rackview_core::model::{
    DiscoveryId, DomainId, KvmHostId, SubnetId, SystemId, TagId, VlanId, ZoneId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    New,
    Commissioning,
    Testing,
    Ready,
    Deployed,
    Rescue,
    Broken,
}

impl NodeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NodeStatus::New => "New",
            NodeStatus::Commissioning => "Commissioning",
            NodeStatus::Testing => "Testing",
            NodeStatus::Ready => "Ready",
            NodeStatus::Deployed => "Deployed",
            NodeStatus::Rescue => "Rescue mode",
            NodeStatus::Broken => "Broken",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: SystemId,
    pub hostname: String,
    pub status: NodeStatus,
    pub powered_on: bool,
    pub locked: bool,
    pub zone: String,
    pub tags: Vec<String>,
    /// Configured network interfaces, copied by a clone
    pub interfaces: Vec<String>,
    /// Storage layout name, copied by a clone
    pub storage_layout: String,
}

impl Node {
    pub fn new(id: impl Into<String>, hostname: impl Into<String>, status: NodeStatus) -> Self {
        Self {
            id: SystemId::new(id),
            hostname: hostname.into(),
            status,
            powered_on: status == NodeStatus::Deployed,
            locked: false,
            zone: "default".to_string(),
            tags: Vec::new(),
            interfaces: vec!["eth0".to_string()],
            storage_layout: "flat".to_string(),
        }
    }
}

/// A host seen on a fabric that is not in the inventory yet.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub id: DiscoveryId,
    pub hostname: Option<String>,
    pub mac: String,
    pub ip: String,
    /// Rack controller that observed it
    pub observer: String,
}

#[derive(Debug, Clone)]
pub struct KvmHost {
    pub id: KvmHostId,
    pub name: String,
    pub kind: &'static str,
    pub vms: u32,
}

#[derive(Debug, Clone)]
pub struct Vlan {
    pub id: VlanId,
    pub vid: u16,
    pub name: String,
    pub dhcp_on: bool,
}

#[derive(Debug, Clone)]
pub struct Subnet {
    pub id: SubnetId,
    pub cidr: String,
    pub vlan: VlanId,
    pub reserved_ranges: u32,
}

#[derive(Debug, Clone)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    pub is_default: bool,
    pub records: u32,
}

/// Identity of a listed row, used to build panel payloads from a selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Node(SystemId),
    Kvm(KvmHostId),
    Subnet(SubnetId),
    Vlan(VlanId),
    Tag(TagId),
    Zone(ZoneId),
    Domain(DomainId),
    Space(String),
    Discovery(DiscoveryId),
}

impl RowKey {
    /// Path segment of the row's detail location.
    pub fn slug(&self) -> String {
        match self {
            RowKey::Node(id) => id.to_string(),
            RowKey::Kvm(id) => id.0.to_string(),
            RowKey::Subnet(id) => format!("subnet-{}", id.0),
            RowKey::Vlan(id) => format!("vlan-{}", id.0),
            RowKey::Tag(id) => id.0.to_string(),
            RowKey::Zone(id) => id.0.to_string(),
            RowKey::Domain(id) => id.0.to_string(),
            RowKey::Space(name) => format!("space-{name}"),
            RowKey::Discovery(id) => id.0.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub key: RowKey,
    pub name: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub machines: Vec<Node>,
    pub controllers: Vec<Node>,
    pub devices: Vec<Node>,
    pub kvm_hosts: Vec<KvmHost>,
    pub vlans: Vec<Vlan>,
    pub subnets: Vec<Subnet>,
    pub spaces: Vec<String>,
    pub tags: Vec<Tag>,
    pub zones: Vec<Zone>,
    pub domains: Vec<Domain>,
    pub discoveries: Vec<Discovery>,
    next_id: u32,
}

impl Inventory {
    /// A small lab, enough for every section to have something to act on.
    pub fn sample() -> Self {
        let mut inventory = Self {
            machines: vec![
                Node::new("k8s7yx", "amazing-krill", NodeStatus::Ready),
                Node::new("p4q2wb", "noted-eel", NodeStatus::Deployed),
                Node::new("g6fht2", "fine-cobra", NodeStatus::New),
                Node::new("x3m9dd", "solid-heron", NodeStatus::Broken),
            ],
            controllers: vec![Node::new("rc01aa", "region-1", NodeStatus::Deployed)],
            devices: vec![
                Node::new("dv8812", "switch-a", NodeStatus::Deployed),
                Node::new("dv8813", "pdu-rack-2", NodeStatus::Deployed),
            ],
            kvm_hosts: vec![KvmHost {
                id: KvmHostId(1),
                name: "lxd-cluster".to_string(),
                kind: "LXD",
                vms: 3,
            }],
            vlans: vec![Vlan {
                id: VlanId(5001),
                vid: 0,
                name: "untagged".to_string(),
                dhcp_on: false,
            }],
            subnets: vec![Subnet {
                id: SubnetId(1),
                cidr: "10.10.0.0/24".to_string(),
                vlan: VlanId(5001),
                reserved_ranges: 1,
            }],
            spaces: Vec::new(),
            tags: vec![
                Tag {
                    id: TagId(1),
                    name: "virtual".to_string(),
                    comment: "Automatic: VMs".to_string(),
                },
                Tag {
                    id: TagId(2),
                    name: "gpu".to_string(),
                    comment: String::new(),
                },
            ],
            zones: vec![Zone {
                id: ZoneId(1),
                name: "default".to_string(),
            }],
            domains: vec![Domain {
                id: DomainId(0),
                name: "maas".to_string(),
                is_default: true,
                records: 4,
            }],
            discoveries: vec![
                Discovery {
                    id: DiscoveryId(1),
                    hostname: Some("printer-3f".to_string()),
                    mac: "00:16:3e:4a:10:01".to_string(),
                    ip: "10.10.0.41".to_string(),
                    observer: "region-1".to_string(),
                },
                Discovery {
                    id: DiscoveryId(2),
                    hostname: None,
                    mac: "00:16:3e:4a:10:7c".to_string(),
                    ip: "10.10.0.77".to_string(),
                    observer: "region-1".to_string(),
                },
            ],
            next_id: 100,
        };
        let eel = &mut inventory.machines[1];
        eel.tags.push("gpu".to_string());
        eel.interfaces.push("bond0".to_string());
        eel.storage_layout = "lvm".to_string();
        inventory
    }

    /// Allocate an id for a newly created resource.
    pub fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn nodes(&self, section: Section) -> &[Node] {
        match section {
            Section::Machines => &self.machines,
            Section::Controllers => &self.controllers,
            Section::Devices => &self.devices,
            _ => &[],
        }
    }

    pub fn nodes_mut(&mut self, section: Section) -> Option<&mut Vec<Node>> {
        match section {
            Section::Machines => Some(&mut self.machines),
            Section::Controllers => Some(&mut self.controllers),
            Section::Devices => Some(&mut self.devices),
            _ => None,
        }
    }

    /// Rows shown by the list screen of `section`.
    pub fn rows(&self, section: Section) -> Vec<Row> {
        let node_row = |node: &Node| Row {
            key: RowKey::Node(node.id.clone()),
            name: node.hostname.clone(),
            detail: format!(
                "{:<14} {:<4} zone={} storage={}{}{}",
                node.status.label(),
                if node.powered_on { "on" } else { "off" },
                node.zone,
                node.storage_layout,
                if node.locked { " locked" } else { "" },
                if node.tags.is_empty() {
                    String::new()
                } else {
                    format!(" tags={}", node.tags.join(","))
                }
            ),
        };

        match section {
            Section::Machines => self.machines.iter().map(node_row).collect(),
            Section::Controllers => self.controllers.iter().map(node_row).collect(),
            Section::Devices => self.devices.iter().map(node_row).collect(),
            Section::Kvm => self
                .kvm_hosts
                .iter()
                .map(|host| Row {
                    key: RowKey::Kvm(host.id),
                    name: host.name.clone(),
                    detail: format!("{} {} VMs", host.kind, host.vms),
                })
                .collect(),
            Section::Networks => self
                .vlans
                .iter()
                .map(|vlan| Row {
                    key: RowKey::Vlan(vlan.id),
                    name: format!("VLAN {}", vlan.vid),
                    detail: format!(
                        "{}{}",
                        vlan.name,
                        if vlan.dhcp_on { " dhcp" } else { "" }
                    ),
                })
                .chain(self.subnets.iter().map(|subnet| Row {
                    key: RowKey::Subnet(subnet.id),
                    name: subnet.cidr.clone(),
                    detail: format!(
                        "vlan={} reserved={}",
                        subnet.vlan.0, subnet.reserved_ranges
                    ),
                }))
                .chain(self.spaces.iter().map(|space| Row {
                    key: RowKey::Space(space.clone()),
                    name: space.clone(),
                    detail: "space".to_string(),
                }))
                .collect(),
            Section::Tags => self
                .tags
                .iter()
                .map(|tag| Row {
                    key: RowKey::Tag(tag.id),
                    name: tag.name.clone(),
                    detail: tag.comment.clone(),
                })
                .collect(),
            Section::Zones => self
                .zones
                .iter()
                .map(|zone| Row {
                    key: RowKey::Zone(zone.id),
                    name: zone.name.clone(),
                    detail: String::new(),
                })
                .collect(),
            Section::Domains => self
                .domains
                .iter()
                .map(|domain| Row {
                    key: RowKey::Domain(domain.id),
                    name: domain.name.clone(),
                    detail: format!(
                        "{} records{}",
                        domain.records,
                        if domain.is_default { " (default)" } else { "" }
                    ),
                })
                .collect(),
            Section::Dashboard => self
                .discoveries
                .iter()
                .map(|discovery| Row {
                    key: RowKey::Discovery(discovery.id),
                    name: discovery
                        .hostname
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    detail: format!(
                        "{} {} seen by {}",
                        discovery.mac, discovery.ip, discovery.observer
                    ),
                })
                .collect(),
            Section::Intro => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_rows_everywhere() {
        let inventory = Inventory::sample();
        for section in Section::NAVIGABLE {
            assert!(!inventory.rows(section).is_empty(), "{section} is empty");
        }
        assert!(inventory.rows(Section::Intro).is_empty());
    }

    #[test]
    fn test_row_slugs_are_unique_per_section() {
        let inventory = Inventory::sample();
        for section in Section::NAVIGABLE {
            let rows = inventory.rows(section);
            let mut slugs: Vec<String> = rows.iter().map(|row| row.key.slug()).collect();
            slugs.sort();
            slugs.dedup();
            assert_eq!(slugs.len(), rows.len(), "{section}");
        }
    }

    #[test]
    fn test_next_id_is_fresh() {
        let mut inventory = Inventory::sample();
        let a = inventory.next_id();
        let b = inventory.next_id();
        assert_ne!(a, b);
    }
}
