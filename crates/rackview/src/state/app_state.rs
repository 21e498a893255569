use rackview_core::{AppPath, Effect, EffectQueue, Section, SessionFacts};

use crate::data::inventory::Inventory;
use crate::data::keybindings_data::KeybindingsConfig;
use crate::data::storage::DataDirectory;
use crate::router::{Route, Router};

use super::SessionState;

/// Shared state every component reads from and key handlers write to.
///
/// Render passes only get `&AppState`. Anything they decide is registered in
/// `effects` during the commit phase and applied by the app afterwards.
#[derive(Debug)]
pub struct AppState {
    pub router: Router,
    pub session: SessionState,
    pub inventory: Inventory,
    pub keybindings: KeybindingsConfig,
    pub effects: EffectQueue,
    /// `None` when running without a data directory (tests)
    pub storage: Option<DataDirectory>,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub exit: bool,
}

impl AppState {
    pub fn new(initial_path: AppPath) -> Self {
        Self {
            router: Router::new(initial_path),
            session: SessionState::default(),
            inventory: Inventory::sample(),
            keybindings: KeybindingsConfig::default(),
            effects: EffectQueue::new(),
            storage: None,
            status_message: None,
            error_message: None,
            exit: false,
        }
    }

    pub fn current_path(&self) -> &AppPath {
        self.router.current()
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    /// Section of the current location, when it is a resource list.
    pub fn active_section(&self) -> Option<Section> {
        match self.route() {
            Route::Resources(section) => Some(section),
            Route::Intro | Route::NotFound => None,
        }
    }

    /// Snapshot of what the onboarding guard decides on.
    pub fn facts(&self) -> SessionFacts {
        SessionFacts {
            auth_loading: self.session.auth_loading(),
            config_loading: self.session.config_loading(),
            is_admin: self.session.is_admin(),
            completed_intro: self.session.completed_intro(),
            completed_user_intro: self.session.completed_user_intro(),
            current_path: self.current_path().clone(),
        }
    }

    /// Defer a history push to the commit phase.
    pub fn go_to(&mut self, path: impl Into<AppPath>) {
        self.effects.defer(Effect::push(path));
    }

    /// Persist changed session records, reporting failures in the status bar.
    pub fn persist_session(&mut self) {
        if !self.session.is_dirty() {
            return;
        }
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = self.session.persist(storage) {
            tracing::error!(error = %e, "Failed to save session");
            self.set_error(format!("Failed to save: {}", e));
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
