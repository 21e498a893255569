//! Keybindings configuration data structures.
//!
//! Defines the customizable keyboard shortcuts serialized to/from
//! `~/.rackview/keybindings.yaml`.

use serde::{Deserialize, Serialize};

/// Root keybindings configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    /// Work everywhere
    pub global: GlobalBindings,
    /// List movement and confirmation
    pub navigation: NavigationBindings,
    /// Open side-panel forms from a resource list
    pub panel: PanelBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalBindings {
    pub quit: Vec<String>,
    pub back: Vec<String>,
    pub next_section: Vec<String>,
    pub prev_section: Vec<String>,
    pub intro: Vec<String>,
}

impl Default for GlobalBindings {
    fn default() -> Self {
        Self {
            quit: vec!["q".into(), "ctrl+c".into()],
            back: vec!["backspace".into()],
            next_section: vec!["tab".into()],
            prev_section: vec!["shift+tab".into()],
            intro: vec!["f2".into()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

impl Default for NavigationBindings {
    fn default() -> Self {
        Self {
            up: vec!["k".into(), "up".into()],
            down: vec!["j".into(), "down".into()],
            select: vec!["space".into()],
            confirm: vec!["enter".into()],
            cancel: vec!["esc".into()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelBindings {
    pub add: Vec<String>,
    pub add_secondary: Vec<String>,
    pub edit: Vec<String>,
    pub delete: Vec<String>,
    pub commission: Vec<String>,
    pub deploy: Vec<String>,
    pub release: Vec<String>,
    pub test: Vec<String>,
    pub power_on: Vec<String>,
    pub power_off: Vec<String>,
    pub set_zone: Vec<String>,
    pub tag: Vec<String>,
    pub lock: Vec<String>,
    pub abort: Vec<String>,
    pub rescue: Vec<String>,
    /// Mark broken, or fixed when already broken
    pub broken: Vec<String>,
    pub refresh: Vec<String>,
    pub add_fabric: Vec<String>,
    pub add_space: Vec<String>,
    pub set_default: Vec<String>,
    /// Clone the machine under the cursor onto the selection
    pub clone: Vec<String>,
    pub clear_all: Vec<String>,
}

impl Default for PanelBindings {
    fn default() -> Self {
        Self {
            add: vec!["a".into()],
            add_secondary: vec!["shift+a".into()],
            edit: vec!["e".into()],
            delete: vec!["d".into(), "delete".into()],
            commission: vec!["c".into()],
            deploy: vec!["shift+d".into()],
            release: vec!["r".into()],
            test: vec!["t".into()],
            power_on: vec!["o".into()],
            power_off: vec!["shift+o".into()],
            set_zone: vec!["z".into()],
            tag: vec!["g".into()],
            lock: vec!["shift+l".into()],
            abort: vec!["x".into()],
            rescue: vec!["shift+e".into()],
            broken: vec!["b".into()],
            refresh: vec!["shift+r".into()],
            add_fabric: vec!["f".into()],
            add_space: vec!["s".into()],
            set_default: vec!["shift+s".into()],
            clone: vec!["shift+c".into()],
            clear_all: vec!["shift+x".into()],
        }
    }
}
