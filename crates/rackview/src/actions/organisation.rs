// Tag, zone and domain actions

use rackview_core::Section;
use rackview_core::model::{DomainId, TagId, ZoneId};
use rackview_core::panel::{DomainPanel, TagPanel, ZonePanel};

use super::ActionResult;
use crate::data::inventory::{Domain, Inventory, Tag, Zone};

pub fn apply_tag(panel: &TagPanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        TagPanel::Add => {
            let n = inventory.next_id();
            let name = format!("tag-{n}");
            inventory.tags.push(Tag {
                id: TagId(n),
                name: name.clone(),
                comment: String::new(),
            });
            ActionResult::done(format!("Created tag {name}"))
        }
        TagPanel::Update { tag } => match inventory.tags.iter_mut().find(|t| t.id == *tag) {
            Some(t) => {
                t.comment = format!("Updated {}", jiff::Timestamp::now().strftime("%F %R"));
                ActionResult::done(format!("Updated tag {}", t.name))
            }
            None => ActionResult::error(format!("Unknown tag {}", tag.0)),
        },
        TagPanel::Delete { tag, from_details } => {
            let Some(index) = inventory.tags.iter().position(|t| t.id == *tag) else {
                return ActionResult::error(format!("Unknown tag {}", tag.0));
            };
            let removed = inventory.tags.remove(index);
            for node in inventory
                .machines
                .iter_mut()
                .chain(inventory.controllers.iter_mut())
                .chain(inventory.devices.iter_mut())
            {
                node.tags.retain(|t| t != &removed.name);
            }

            let summary = format!("Deleted tag {}", removed.name);
            // The details page of a deleted tag no longer exists
            if *from_details {
                ActionResult::done_then(summary, Section::Tags.index_path())
            } else {
                ActionResult::done(summary)
            }
        }
    }
}

pub fn apply_zone(panel: &ZonePanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        ZonePanel::Add => {
            let n = inventory.next_id();
            let name = format!("zone-{n}");
            inventory.zones.push(Zone {
                id: ZoneId(n),
                name: name.clone(),
            });
            ActionResult::done(format!("Added AZ {name}"))
        }
        ZonePanel::Delete { zone } => {
            let Some(index) = inventory.zones.iter().position(|z| z.id == *zone) else {
                return ActionResult::error(format!("Unknown AZ {}", zone.0));
            };
            if inventory.zones[index].name == "default" {
                return ActionResult::error("The default AZ cannot be deleted");
            }
            let removed = inventory.zones.remove(index);
            for node in inventory
                .machines
                .iter_mut()
                .chain(inventory.controllers.iter_mut())
                .chain(inventory.devices.iter_mut())
                .filter(|n| n.zone == removed.name)
            {
                node.zone = "default".to_string();
            }
            ActionResult::done(format!("Deleted AZ {}", removed.name))
        }
    }
}

pub fn apply_domain(panel: &DomainPanel, inventory: &mut Inventory) -> ActionResult {
    match panel {
        DomainPanel::Add => {
            let n = inventory.next_id();
            let name = format!("domain{n}.example");
            inventory.domains.push(Domain {
                id: DomainId(n),
                name: name.clone(),
                is_default: false,
                records: 0,
            });
            ActionResult::done(format!("Added domain {name}"))
        }
        DomainPanel::AddRecord { domain } => match find_domain(inventory, *domain) {
            Some(d) => {
                d.records += 1;
                ActionResult::done(format!("Added record to {}", d.name))
            }
            None => unknown_domain(*domain),
        },
        DomainPanel::SetDefault { domain } => {
            if find_domain(inventory, *domain).is_none() {
                return unknown_domain(*domain);
            }
            for d in inventory.domains.iter_mut() {
                d.is_default = d.id == *domain;
            }
            ActionResult::done("Default domain changed")
        }
        DomainPanel::Delete { domain } => {
            let Some(index) = inventory.domains.iter().position(|d| d.id == *domain) else {
                return unknown_domain(*domain);
            };
            if inventory.domains[index].is_default {
                return ActionResult::error("The default domain cannot be deleted");
            }
            let removed = inventory.domains.remove(index);
            ActionResult::done(format!("Deleted domain {}", removed.name))
        }
    }
}

fn find_domain(inventory: &mut Inventory, id: DomainId) -> Option<&mut Domain> {
    inventory.domains.iter_mut().find(|d| d.id == id)
}

fn unknown_domain(id: DomainId) -> ActionResult {
    ActionResult::error(format!("Unknown domain {}", id.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_tag_from_details_returns_to_list() {
        let mut inventory = Inventory::sample();
        let result = apply_tag(
            &TagPanel::Delete {
                tag: TagId(2),
                from_details: true,
            },
            &mut inventory,
        );

        assert_eq!(
            result,
            ActionResult::done_then("Deleted tag gpu", Section::Tags.index_path())
        );
        assert!(inventory.machines.iter().all(|m| m.tags.is_empty()));
    }

    #[test]
    fn test_delete_tag_from_list_stays() {
        let mut inventory = Inventory::sample();
        let result = apply_tag(
            &TagPanel::Delete {
                tag: TagId(1),
                from_details: false,
            },
            &mut inventory,
        );
        assert_eq!(result, ActionResult::done("Deleted tag virtual"));
        assert_eq!(inventory.tags.len(), 1);
    }

    #[test]
    fn test_default_zone_is_protected() {
        let mut inventory = Inventory::sample();
        let result = apply_zone(&ZonePanel::Delete { zone: ZoneId(1) }, &mut inventory);
        assert!(result.is_error());
        assert_eq!(inventory.zones.len(), 1);
    }

    #[test]
    fn test_deleting_zone_moves_nodes_to_default() {
        let mut inventory = Inventory::sample();
        apply_zone(&ZonePanel::Add, &mut inventory);
        let zone = inventory.zones[1].clone();
        inventory.machines[0].zone = zone.name.clone();

        apply_zone(&ZonePanel::Delete { zone: zone.id }, &mut inventory);
        assert_eq!(inventory.machines[0].zone, "default");
    }

    #[test]
    fn test_set_default_domain() {
        let mut inventory = Inventory::sample();
        apply_domain(&DomainPanel::Add, &mut inventory);
        let added = inventory.domains[1].id;

        apply_domain(&DomainPanel::SetDefault { domain: added }, &mut inventory);
        assert!(!inventory.domains[0].is_default);
        assert!(inventory.domains[1].is_default);

        let old = inventory.domains[0].id;
        assert!(!apply_domain(&DomainPanel::Delete { domain: old }, &mut inventory).is_error());
        assert!(apply_domain(&DomainPanel::Delete { domain: added }, &mut inventory).is_error());
    }
}
