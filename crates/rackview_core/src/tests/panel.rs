//! Side-panel slot tests

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::model::{AppPath, SystemId, TagId, ZoneId};
use crate::panel::{
    MachinePanel, NodeAction, PanelContent, PanelController, PanelStore, TagPanel, ZonePanel,
};

fn add_tag() -> PanelContent {
    PanelContent::Tag(TagPanel::Add)
}

fn delete_tag(id: u32) -> PanelContent {
    PanelContent::Tag(TagPanel::Delete {
        tag: TagId(id),
        from_details: false,
    })
}

#[test]
fn test_last_write_wins() {
    let controller = PanelController::new();
    let panel = controller.use_side_panel("tags", &AppPath::new("/tags"));

    let writes = [
        Some(add_tag()),
        None,
        Some(delete_tag(1)),
        Some(PanelContent::Zone(ZonePanel::Delete { zone: ZoneId(2) })),
        Some(delete_tag(7)),
    ];
    for write in writes.iter().cloned() {
        panel.set_content(write);
    }

    assert_eq!(panel.content(), Some(delete_tag(7)));
    assert_eq!(controller.store().content(), Some(delete_tag(7)));
}

#[test]
fn test_every_write_bumps_revision() {
    let controller = PanelController::new();
    let panel = controller.use_side_panel("tags", &AppPath::new("/tags"));
    let before = controller.store().revision();

    panel.open(add_tag());
    panel.open(add_tag());
    panel.close();

    assert_eq!(controller.store().revision(), before + 3);
}

#[test]
fn test_handles_share_one_slot() {
    let controller = PanelController::new();
    let location = AppPath::new("/machines");
    let list = controller.use_side_panel("machine-list", &location);
    let chrome = controller.use_side_panel("panel-chrome", &location);

    list.open(PanelContent::Machine(MachinePanel::Action {
        action: NodeAction::Deploy,
        machines: vec![SystemId::new("abc123")],
    }));

    assert!(chrome.is_open());
    assert_eq!(chrome.content(), list.content());
    assert_eq!(controller.store().consumers(), 2);
}

#[test]
fn test_route_change_closes_panel() {
    let controller = PanelController::new();
    let mut panel = controller.use_side_panel("tags", &AppPath::new("/a"));

    panel.open(add_tag());
    assert!(!panel.sync_location(&AppPath::new("/a")));
    assert!(panel.is_open());

    assert!(panel.sync_location(&AppPath::new("/b")));
    assert_eq!(panel.content(), None);
    assert_eq!(panel.observed(), &AppPath::new("/b"));
}

#[test]
fn test_mounting_does_not_close() {
    let controller = PanelController::new();
    let first = controller.use_side_panel("first", &AppPath::new("/tags"));
    first.open(add_tag());

    let _second = controller.use_side_panel("second", &AppPath::new("/tags"));
    assert_eq!(first.content(), Some(add_tag()));
}

#[test]
fn test_normalized_paths_are_not_a_change() {
    let controller = PanelController::new();
    let mut panel = controller.use_side_panel("tags", &AppPath::new("/tags"));
    panel.open(add_tag());

    assert!(!panel.sync_location(&AppPath::new("/tags/")));
    assert!(panel.is_open());
}

#[test]
fn test_teardown_closes_panel() {
    let controller = PanelController::new();
    let observer = controller.use_side_panel("observer", &AppPath::new("/tags"));
    {
        let panel = controller.use_side_panel("tags", &AppPath::new("/tags"));
        panel.open(delete_tag(3));
        assert!(observer.is_open());
    }
    assert_eq!(observer.content(), None);
    assert_eq!(controller.store().consumers(), 1);
}

#[test]
fn test_teardown_closes_panel_opened_by_someone_else() {
    let controller = PanelController::new();
    let opener = controller.use_side_panel("opener", &AppPath::new("/zones"));
    let bystander = controller.use_side_panel("bystander", &AppPath::new("/zones"));

    opener.open(PanelContent::Zone(ZonePanel::Add));
    drop(bystander);

    assert_eq!(opener.content(), None);
}

#[test]
fn test_teardown_on_unwind() {
    let store = PanelStore::new();
    let controller = PanelController::with_store(store.clone());

    let result = catch_unwind(AssertUnwindSafe(|| {
        let panel = controller.use_side_panel("panicky", &AppPath::new("/tags"));
        panel.open(add_tag());
        panic!("render failed");
    }));

    assert!(result.is_err());
    assert!(!store.is_open());
    assert_eq!(store.consumers(), 0);
}

#[test]
fn test_isolated_stores() {
    let first = PanelController::new();
    let second = PanelController::new();
    let a = first.use_side_panel("a", &AppPath::root());
    let b = second.use_side_panel("b", &AppPath::root());

    a.open(add_tag());
    assert!(!b.is_open());

    b.open(delete_tag(3));
    assert_eq!(a.content(), Some(add_tag()));
    assert_eq!(second.store().content(), Some(delete_tag(3)));
}

#[test]
fn test_variant_tags_are_distinct() {
    use crate::model::{DiscoveryId, DomainId, KvmHostId, SubnetId, VlanId};
    use crate::panel::{
        ControllerPanel, DashboardPanel, DevicePanel, DomainPanel, KvmPanel, SubnetPanel,
    };

    let ids = vec![SystemId::new("x")];
    let mut variants = vec![
        PanelContent::Machine(MachinePanel::Add),
        PanelContent::Machine(MachinePanel::AddChassis),
        PanelContent::Machine(MachinePanel::Clone {
            source: SystemId::new("src"),
            machines: ids.clone(),
        }),
        PanelContent::Controller(ControllerPanel::Add),
        PanelContent::Device(DevicePanel::Add),
        PanelContent::Device(DevicePanel::SetZone {
            devices: ids.clone(),
        }),
        PanelContent::Device(DevicePanel::Delete {
            devices: ids.clone(),
        }),
        PanelContent::Kvm(KvmPanel::AddLxd),
        PanelContent::Kvm(KvmPanel::AddVirsh),
        PanelContent::Kvm(KvmPanel::Compose { host: KvmHostId(1) }),
        PanelContent::Kvm(KvmPanel::Refresh {
            hosts: vec![KvmHostId(1)],
        }),
        PanelContent::Kvm(KvmPanel::Delete { host: KvmHostId(1) }),
        PanelContent::Subnet(SubnetPanel::AddSubnet),
        PanelContent::Subnet(SubnetPanel::AddVlan),
        PanelContent::Subnet(SubnetPanel::AddFabric),
        PanelContent::Subnet(SubnetPanel::AddSpace),
        PanelContent::Subnet(SubnetPanel::EditVlan { vlan: VlanId(1) }),
        PanelContent::Subnet(SubnetPanel::ReserveRange {
            subnet: SubnetId(1),
        }),
        PanelContent::Subnet(SubnetPanel::DeleteSubnet {
            subnet: SubnetId(1),
        }),
        PanelContent::Tag(TagPanel::Add),
        PanelContent::Tag(TagPanel::Update { tag: TagId(1) }),
        delete_tag(1),
        PanelContent::Zone(ZonePanel::Add),
        PanelContent::Zone(ZonePanel::Delete { zone: ZoneId(1) }),
        PanelContent::Domain(DomainPanel::Add),
        PanelContent::Domain(DomainPanel::AddRecord {
            domain: DomainId(1),
        }),
        PanelContent::Domain(DomainPanel::SetDefault {
            domain: DomainId(1),
        }),
        PanelContent::Domain(DomainPanel::Delete {
            domain: DomainId(1),
        }),
        PanelContent::Dashboard(DashboardPanel::ClearAll),
        PanelContent::Dashboard(DashboardPanel::AddDevice {
            discovery: DiscoveryId(1),
        }),
        PanelContent::Dashboard(DashboardPanel::Delete {
            discoveries: vec![DiscoveryId(1)],
        }),
    ];
    for action in NodeAction::ALL {
        variants.push(PanelContent::Machine(MachinePanel::Action {
            action,
            machines: ids.clone(),
        }));
    }
    for action in NodeAction::CONTROLLER {
        variants.push(PanelContent::Controller(ControllerPanel::Action {
            action,
            controllers: ids.clone(),
        }));
    }

    let mut views: Vec<String> = variants.iter().map(|v| v.view().to_string()).collect();
    let total = views.len();
    views.sort();
    views.dedup();
    assert_eq!(views.len(), total, "two panel variants share a view tag");
}
