// Machine, controller and device actions

use rackview_core::Section;
use rackview_core::model::SystemId;
use rackview_core::panel::{ControllerPanel, DevicePanel, MachinePanel, NodeAction};

use super::{ActionResult, plural};
use crate::data::inventory::{Inventory, Node, NodeStatus};

pub fn apply_machine(panel: &MachinePanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        MachinePanel::Add => {
            let node = new_node(inventory, "machine", NodeStatus::New);
            let summary = format!("Added machine {}", node.hostname);
            inventory.machines.push(node);
            ActionResult::done(summary)
        }
        MachinePanel::AddChassis => {
            // A chassis enlists every machine it reports; the lab ones hold two
            for _ in 0..2 {
                let node = new_node(inventory, "chassis", NodeStatus::New);
                inventory.machines.push(node);
            }
            ActionResult::done("Added chassis with 2 machines")
        }
        MachinePanel::Action { action, machines } => {
            apply_node_action(*action, machines, Section::Machines, inventory)
        }
        MachinePanel::Clone { source, machines } => clone_machines(source, machines, inventory),
    }
}

/// Copy the interfaces and storage layout of `source` onto every target.
/// Targets must be ready and unlocked, and cannot include the source.
fn clone_machines(
    source: &SystemId,
    targets: &[SystemId],
    inventory: &mut Inventory,
) -> ActionResult {
    if targets.is_empty() {
        return ActionResult::error("No machines selected to clone to");
    }
    if targets.contains(source) {
        return ActionResult::error("The source cannot also be a destination");
    }
    let Some(template) = inventory.machines.iter().find(|m| &m.id == source).cloned() else {
        return ActionResult::error(format!("Unknown machine {source}"));
    };

    for id in targets {
        let Some(node) = inventory.machines.iter().find(|m| &m.id == id) else {
            return ActionResult::error(format!("Unknown machine {id}"));
        };
        if node.locked {
            return ActionResult::error(format!("{} is locked", node.hostname));
        }
        if node.status != NodeStatus::Ready {
            return ActionResult::error(format!(
                "Cannot clone to {} while {}",
                node.hostname,
                node.status.label().to_lowercase()
            ));
        }
    }

    for node in inventory
        .machines
        .iter_mut()
        .filter(|m| targets.contains(&m.id))
    {
        node.interfaces = template.interfaces.clone();
        node.storage_layout = template.storage_layout.clone();
    }

    ActionResult::done(format!(
        "Cloned {} to {}",
        template.hostname,
        plural(targets.len(), "machine")
    ))
}

pub fn apply_controller(panel: &ControllerPanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        ControllerPanel::Add => {
            let node = new_node(inventory, "region", NodeStatus::Deployed);
            let summary = format!("Added controller {}", node.hostname);
            inventory.controllers.push(node);
            ActionResult::done(summary)
        }
        ControllerPanel::Action {
            action,
            controllers,
        } => {
            if !NodeAction::CONTROLLER.contains(action) {
                return ActionResult::error(format!(
                    "Controllers do not support {}",
                    action.slug()
                ));
            }
            apply_node_action(*action, controllers, Section::Controllers, inventory)
        }
    }
}

pub fn apply_device(panel: &DevicePanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        DevicePanel::Add => {
            let node = new_node(inventory, "device", NodeStatus::Deployed);
            let summary = format!("Added device {}", node.hostname);
            inventory.devices.push(node);
            ActionResult::done(summary)
        }
        DevicePanel::SetZone { devices } => {
            apply_node_action(NodeAction::SetZone, devices, Section::Devices, inventory)
        }
        DevicePanel::Delete { devices } => {
            apply_node_action(NodeAction::Delete, devices, Section::Devices, inventory)
        }
    }
}

fn new_node(inventory: &mut Inventory, prefix: &str, status: NodeStatus) -> Node {
    let n = inventory.next_id();
    Node::new(format!("{prefix:.2}{n:04x}"), format!("{prefix}-{n}"), status)
}

/// Whether `action` may run on `node` in its current state.
fn check(node: &Node, action: NodeAction) -> Result<(), String> {
    use NodeStatus::*;

    if node.locked && action != NodeAction::Unlock {
        return Err(format!("{} is locked", node.hostname));
    }

    let allowed = match action {
        NodeAction::Commission => matches!(node.status, New | Ready | Broken),
        NodeAction::Deploy => node.status == Ready,
        NodeAction::Release => matches!(node.status, Deployed | Rescue),
        NodeAction::Abort => matches!(node.status, Commissioning | Testing),
        NodeAction::Test => matches!(node.status, New | Ready | Deployed | Broken),
        NodeAction::Rescue => matches!(node.status, Ready | Deployed | Broken),
        NodeAction::MarkBroken => node.status != Broken,
        NodeAction::MarkFixed => node.status == Broken,
        NodeAction::Lock => !node.locked,
        NodeAction::Unlock => node.locked,
        NodeAction::PowerOn
        | NodeAction::PowerOff
        | NodeAction::SetZone
        | NodeAction::Tag
        | NodeAction::Delete => true,
    };

    if allowed {
        Ok(())
    } else {
        Err(format!(
            "Cannot {} {} while {}",
            action.slug(),
            node.hostname,
            node.status.label().to_lowercase()
        ))
    }
}

fn apply_to(node: &mut Node, action: NodeAction, zone: &str, tag: Option<&str>) {
    match action {
        NodeAction::Commission => node.status = NodeStatus::Commissioning,
        NodeAction::Deploy => {
            node.status = NodeStatus::Deployed;
            node.powered_on = true;
        }
        NodeAction::Release => {
            node.status = NodeStatus::Ready;
            node.powered_on = false;
        }
        NodeAction::Abort => {
            node.status = match node.status {
                NodeStatus::Commissioning => NodeStatus::New,
                _ => NodeStatus::Ready,
            }
        }
        NodeAction::Test => node.status = NodeStatus::Testing,
        NodeAction::Rescue => node.status = NodeStatus::Rescue,
        NodeAction::PowerOn => node.powered_on = true,
        NodeAction::PowerOff => node.powered_on = false,
        NodeAction::Lock => node.locked = true,
        NodeAction::Unlock => node.locked = false,
        NodeAction::MarkBroken => node.status = NodeStatus::Broken,
        NodeAction::MarkFixed => node.status = NodeStatus::Ready,
        NodeAction::SetZone => node.zone = zone.to_string(),
        NodeAction::Tag => {
            if let Some(tag) = tag
                && !node.tags.iter().any(|t| t == tag)
            {
                node.tags.push(tag.to_string());
            }
        }
        // Removed by the caller
        NodeAction::Delete => {}
    }
}

/// Run `action` on every node in `ids`. Nothing changes unless every target
/// accepts the action.
fn apply_node_action(
    action: NodeAction,
    ids: &[SystemId],
    section: Section,
    inventory: &mut Inventory,
) -> ActionResult {
    let noun = match section {
        Section::Controllers => "controller",
        Section::Devices => "device",
        _ => "machine",
    };
    if ids.is_empty() {
        return ActionResult::error(format!("No {noun}s selected"));
    }

    // Zone and tag forms apply the most recently created one
    let zone = inventory
        .zones
        .last()
        .map(|z| z.name.clone())
        .unwrap_or_else(|| "default".to_string());
    let tag = inventory.tags.last().map(|t| t.name.clone());
    if action == NodeAction::Tag && tag.is_none() {
        return ActionResult::error("Create a tag first");
    }

    let Some(nodes) = inventory.nodes_mut(section) else {
        return ActionResult::error(format!("{section} has no {noun}s"));
    };

    for id in ids {
        match nodes.iter().find(|n| &n.id == id) {
            Some(node) => {
                if let Err(msg) = check(node, action) {
                    return ActionResult::error(msg);
                }
            }
            None => return ActionResult::error(format!("Unknown {noun} {id}")),
        }
    }

    if action == NodeAction::Delete {
        nodes.retain(|n| !ids.contains(&n.id));
    } else {
        for node in nodes.iter_mut().filter(|n| ids.contains(&n.id)) {
            apply_to(node, action, &zone, tag.as_deref());
        }
    }

    ActionResult::done(format!("{} {}", action.label(), plural(ids.len(), noun)))
}
