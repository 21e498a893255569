//! Signed-in session: the loaded config and user, and intro progress.

use jiff::Timestamp;

use crate::data::session_data::{DataConfig, UserRecord};
use crate::data::storage::{DataDirectory, StorageError};

/// `None` in either slot means that half of the session is still loading.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub config: Option<DataConfig>,
    pub user: Option<UserRecord>,
    /// Set when the background load failed
    pub load_error: Option<String>,
    config_dirty: bool,
    user_dirty: bool,
}

impl SessionState {
    /// A session whose config and user are already known.
    pub fn loaded(config: DataConfig, user: UserRecord) -> Self {
        Self {
            config: Some(config),
            user: Some(user),
            ..Default::default()
        }
    }

    pub fn auth_loading(&self) -> bool {
        self.user.is_none()
    }

    pub fn config_loading(&self) -> bool {
        self.config.is_none()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn completed_intro(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.completed_intro)
    }

    pub fn completed_user_intro(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.completed_user_intro)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Mutable config, marked for saving. `None` while loading.
    pub fn config_mut(&mut self) -> Option<&mut DataConfig> {
        self.config_dirty |= self.config.is_some();
        self.config.as_mut()
    }

    pub fn user_mut(&mut self) -> Option<&mut UserRecord> {
        self.user_dirty |= self.user.is_some();
        self.user.as_mut()
    }

    /// Finish the system-level intro. Returns false while the config is
    /// still loading.
    pub fn complete_intro(&mut self, now: Timestamp) -> bool {
        match self.config_mut() {
            Some(config) => {
                config.completed_intro = true;
                config.completed_intro_at = Some(now);
                tracing::info!("Intro completed");
                true
            }
            None => false,
        }
    }

    pub fn complete_user_intro(&mut self, now: Timestamp) -> bool {
        match self.user_mut() {
            Some(user) => {
                user.completed_user_intro = true;
                user.completed_user_intro_at = Some(now);
                tracing::info!(username = %user.username, "User intro completed");
                true
            }
            None => false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.config_dirty || self.user_dirty
    }

    /// Write changed records back to the data directory.
    pub fn persist(&mut self, storage: &DataDirectory) -> Result<(), StorageError> {
        if self.config_dirty
            && let Some(config) = &self.config
        {
            storage.save_config(config)?;
            self.config_dirty = false;
        }
        if self.user_dirty
            && let Some(user) = &self.user
        {
            storage.update_user(user)?;
            self.user_dirty = false;
        }
        Ok(())
    }
}
