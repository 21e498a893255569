use rackview_core::panel::{MachinePanel, TagPanel};
use rackview_core::{AppPath, PanelContent};

use crate::event::KeyCode;

use super::{Harness, char_key, key, session, state_at};

fn ready(path: &str) -> Harness {
    Harness::new(state_at(path, session(true, true, true)))
}

#[test]
fn test_panel_survives_redraws() {
    let mut h = ready("/machines");
    h.press(char_key('a'));
    assert!(h.panel_open());

    h.settle();
    h.settle();
    assert!(h.panel_open());
    assert!(h.screen_text().contains("Add machine"));
}

#[test]
fn test_last_open_wins() {
    let mut h = ready("/machines");
    h.press(char_key('a'));
    h.press(char_key('A'));

    assert_eq!(
        h.app.panels().store().content(),
        Some(PanelContent::Machine(MachinePanel::AddChassis))
    );
}

#[test]
fn test_switching_section_closes_panel() {
    let mut h = ready("/tags");
    h.press(char_key('a'));
    assert!(h.panel_open());

    assert!(h.screen_text().contains("Create new tag"));

    h.press(key(KeyCode::Tab));
    assert_eq!(h.path(), "/zones");
    assert!(!h.panel_open());
    assert!(!h.screen_text().contains("Create new tag"));
}

#[test]
fn test_route_change_within_section_closes_panel() {
    let mut h = ready("/tags");
    h.press(char_key('a'));
    assert!(h.panel_open());

    // Same screen stays mounted; only the location moves
    h.app.state_mut().router.push(AppPath::new("/tags/1"));
    h.settle();
    assert!(!h.panel_open());
    assert!(!h.screen_text().contains("Create new tag"));
}

#[test]
fn test_back_from_details_repaints_without_panel() {
    let mut h = ready("/tags");
    h.press(key(KeyCode::Enter));
    assert_eq!(h.path(), "/tags/1");

    h.press(char_key('e'));
    assert!(h.screen_text().contains("Update tag"));

    // The resources screen stays mounted across list and details
    h.press(key(KeyCode::Backspace));
    assert_eq!(h.path(), "/tags");
    assert!(!h.panel_open());
    assert!(!h.screen_text().contains("Update tag"));
}

#[test]
fn test_panel_closed_before_first_paint_at_new_location() {
    let mut h = ready("/tags");
    h.press(char_key('a'));
    assert!(h.panel_open());

    // Synced ahead of the draw, before any commit runs
    h.app.state_mut().router.push(AppPath::new("/tags/2"));
    h.app.mount_screen();
    h.app.sync_panel();
    assert!(!h.panel_open());
}

#[test]
fn test_back_closes_panel() {
    let mut h = ready("/tags");
    h.press(key(KeyCode::Enter));
    assert_eq!(h.path(), "/tags/1");

    h.press(char_key('e'));
    assert!(h.panel_open());

    // Esc belongs to the open panel
    h.press(key(KeyCode::Esc));
    assert!(!h.panel_open());
    assert_eq!(h.path(), "/tags/1");

    h.press(char_key('e'));
    h.press(key(KeyCode::Backspace));
    assert_eq!(h.path(), "/tags");
    assert!(!h.panel_open());
}

#[test]
fn test_delete_from_details_returns_to_list() {
    let mut h = ready("/tags/2");
    let before = h.app.state().inventory.tags.len();

    h.press(char_key('d'));
    assert_eq!(
        h.app.panels().store().content(),
        Some(PanelContent::Tag(TagPanel::Delete {
            tag: rackview_core::model::TagId(2),
            from_details: true,
        }))
    );

    h.press(key(KeyCode::Enter));
    assert!(!h.panel_open());
    assert_eq!(h.path(), "/tags");
    assert_eq!(h.app.state().inventory.tags.len(), before - 1);
    assert!(h.screen_text().contains("Deleted tag gpu"));
}

#[test]
fn test_clear_discoveries_from_dashboard() {
    let mut h = ready("/dashboard");
    assert!(h.screen_text().contains("printer-3f"));

    h.press(char_key('X'));
    assert!(h.screen_text().contains("Clear all discoveries"));

    h.press(key(KeyCode::Enter));
    assert!(!h.panel_open());
    assert!(h.app.state().inventory.discoveries.is_empty());
    assert!(h.screen_text().contains("Cleared 2 discoveries"));
    assert!(!h.screen_text().contains("printer-3f"));
}

#[test]
fn test_clone_machine_onto_selection() {
    let mut h = ready("/machines");
    // Select amazing-krill, then rest the cursor on noted-eel
    h.press(key(KeyCode::Char(' ')));
    h.press(char_key('j'));
    h.press(char_key('C'));
    assert!(h.screen_text().contains("Clone to 1 machine"));

    h.press(key(KeyCode::Enter));
    assert!(h.screen_text().contains("Cloned noted-eel to 1 machine"));
    assert_eq!(h.app.state().inventory.machines[0].storage_layout, "lvm");
}

#[test]
fn test_intro_redirect_closes_panel() {
    let mut h = ready("/machines");
    h.press(char_key('a'));
    assert!(h.panel_open());

    // Losing the user intro sends the console back into the flow
    if let Some(user) = h.app.state_mut().session.user.as_mut() {
        user.completed_user_intro = false;
    }
    h.settle();
    assert_eq!(h.path(), "/intro/user");
    assert!(!h.panel_open());
}
