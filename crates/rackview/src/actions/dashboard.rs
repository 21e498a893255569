// Network discovery actions

use rackview_core::model::DiscoveryId;
use rackview_core::panel::DashboardPanel;

use super::{ActionResult, plural};
use crate::data::inventory::{Inventory, Node, NodeStatus};

pub fn apply_dashboard(panel: &DashboardPanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        DashboardPanel::ClearAll => {
            let count = inventory.discoveries.len();
            if count == 0 {
                return ActionResult::error("There are no discoveries to clear");
            }
            inventory.discoveries.clear();
            ActionResult::done(format!("Cleared {}", plural(count, "discovery")))
        }
        DashboardPanel::AddDevice { discovery } => {
            let Some(idx) = inventory.discoveries.iter().position(|d| d.id == *discovery) else {
                return unknown_discovery(*discovery);
            };
            let found = inventory.discoveries.remove(idx);

            let n = inventory.next_id();
            let hostname = found.hostname.unwrap_or_else(|| format!("device-{n}"));
            let mut device = Node::new(format!("dv{n:04x}"), hostname.clone(), NodeStatus::Deployed);
            device.interfaces = vec![found.mac];
            inventory.devices.push(device);

            ActionResult::done(format!("Added {hostname} ({}) as a device", found.ip))
        }
        DashboardPanel::Delete { discoveries } => {
            if discoveries.is_empty() {
                return ActionResult::error("No discoveries selected");
            }
            if let Some(missing) = discoveries
                .iter()
                .find(|id| !inventory.discoveries.iter().any(|d| d.id == **id))
            {
                return unknown_discovery(*missing);
            }
            inventory
                .discoveries
                .retain(|d| !discoveries.contains(&d.id));
            ActionResult::done(format!("Deleted {}", plural(discoveries.len(), "discovery")))
        }
    }
}

fn unknown_discovery(id: DiscoveryId) -> ActionResult {
    ActionResult::error(format!("Unknown discovery {}", id.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_all() {
        let mut inventory = Inventory::sample();
        let result = apply_dashboard(&DashboardPanel::ClearAll, &mut inventory);
        assert_eq!(result, ActionResult::done("Cleared 2 discoveries"));
        assert!(inventory.discoveries.is_empty());

        // Nothing left to clear
        assert!(apply_dashboard(&DashboardPanel::ClearAll, &mut inventory).is_error());
    }

    #[test]
    fn test_add_as_device() {
        let mut inventory = Inventory::sample();
        let devices = inventory.devices.len();

        let result = apply_dashboard(
            &DashboardPanel::AddDevice {
                discovery: DiscoveryId(1),
            },
            &mut inventory,
        );

        assert_eq!(result, ActionResult::done("Added printer-3f (10.10.0.41) as a device"));
        assert_eq!(inventory.devices.len(), devices + 1);
        assert_eq!(inventory.discoveries.len(), 1);
        let device = inventory.devices.last().unwrap();
        assert_eq!(device.interfaces, vec!["00:16:3e:4a:10:01".to_string()]);
    }

    #[test]
    fn test_unnamed_discovery_gets_a_hostname() {
        let mut inventory = Inventory::sample();
        apply_dashboard(
            &DashboardPanel::AddDevice {
                discovery: DiscoveryId(2),
            },
            &mut inventory,
        );
        let device = inventory.devices.last().unwrap();
        assert!(device.hostname.starts_with("device-"));
    }

    #[test]
    fn test_delete_unknown_changes_nothing() {
        let mut inventory = Inventory::sample();
        let result = apply_dashboard(
            &DashboardPanel::Delete {
                discoveries: vec![DiscoveryId(1), DiscoveryId(9)],
            },
            &mut inventory,
        );
        assert_eq!(result, ActionResult::error("Unknown discovery 9"));
        assert_eq!(inventory.discoveries.len(), 2);
    }
}
