//! Records persisted in the data directory.
//!
//! ```text
//! ~/.rackview/
//!   config.yaml        # DataConfig
//!   users.yaml         # Vec<UserRecord>
//!   keybindings.yaml   # KeybindingsConfig
//! ```

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

fn default_region_name() -> String {
    "rackview".to_string()
}

/// Install-wide configuration stored in config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// User signed in when no `--user` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_user: Option<String>,

    /// Region name chosen on the first intro step
    #[serde(default = "default_region_name")]
    pub region_name: String,

    /// Image releases picked on the images step
    #[serde(default)]
    pub images: Vec<String>,

    /// System-level intro finished
    #[serde(default)]
    pub completed_intro: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_intro_at: Option<Timestamp>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            active_user: None,
            region_name: default_region_name(),
            images: Vec::new(),
            completed_intro: false,
            completed_intro_at: None,
        }
    }
}

/// One console user, stored in users.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,

    /// Per-user intro finished
    #[serde(default)]
    pub completed_user_intro: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_user_intro_at: Option<Timestamp>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
            ssh_key: None,
            completed_user_intro: false,
            completed_user_intro_at: None,
        }
    }
}
