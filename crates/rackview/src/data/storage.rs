//! Data directory storage
//!
//! Directory structure:
//! ~/.rackview/
//!   config.yaml          # Install settings, intro progress, active user
//!   users.yaml           # Users and their intro progress
//!   keybindings.yaml     # Optional keybinding overrides

use std::fs;
use std::path::{Path, PathBuf};

use super::keybindings_data::KeybindingsConfig;
use super::session_data::{DataConfig, UserRecord};

/// Username created on first run when users.yaml is empty.
pub const DEFAULT_ADMIN: &str = "admin";

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    UnknownUser(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::UnknownUser(name) => write!(f, "No such user: {}", name),
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the data directory
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    fn users_path(&self) -> PathBuf {
        self.root.join("users.yaml")
    }

    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Load config.yaml, or defaults when it does not exist yet
    pub fn load_config(&self) -> Result<DataConfig, StorageError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Ok(DataConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| StorageError::Io(format!("Failed to read config: {}", e)))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save_config(&self, config: &DataConfig) -> Result<(), StorageError> {
        self.init()?;
        let yaml = serde_saphyr::to_string(config)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))?;

        fs::write(self.config_path(), yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {}", e)))
    }

    pub fn load_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        let users_path = self.users_path();
        if !users_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&users_path)
            .map_err(|e| StorageError::Io(format!("Failed to read users: {}", e)))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse users: {}", e)))
    }

    pub fn save_users(&self, users: &[UserRecord]) -> Result<(), StorageError> {
        self.init()?;
        let yaml = serde_saphyr::to_string(&users)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize users: {}", e)))?;

        fs::write(self.users_path(), yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write users: {}", e)))
    }

    /// Resolve the user to sign in as.
    ///
    /// An explicit `requested` name must exist. Without one, the config's
    /// active user is used, then the first user on file. An empty users file
    /// gets a first admin account.
    pub fn resolve_user(
        &self,
        requested: Option<&str>,
        config: &DataConfig,
    ) -> Result<UserRecord, StorageError> {
        let mut users = self.load_users()?;

        if users.is_empty() {
            tracing::info!(username = DEFAULT_ADMIN, "No users on file, creating admin");
            users.push(UserRecord::new(DEFAULT_ADMIN, true));
            self.save_users(&users)?;
        }

        if let Some(name) = requested {
            return users
                .into_iter()
                .find(|u| u.username == name)
                .ok_or_else(|| StorageError::UnknownUser(name.to_string()));
        }

        let preferred = config
            .active_user
            .as_deref()
            .and_then(|name| users.iter().position(|u| u.username == name))
            .unwrap_or(0);
        Ok(users.swap_remove(preferred))
    }

    /// Write back one user's record, adding it if it is new.
    pub fn update_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let mut users = self.load_users()?;
        match users.iter_mut().find(|u| u.username == user.username) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.save_users(&users)
    }

    pub fn load_keybindings(&self) -> KeybindingsConfig {
        KeybindingsConfig::load_or_default(&self.root)
    }
}
