//! End-to-end console tests
//!
//! These drive [`App`] through its render, commit and input phases on a
//! [`TestBackend`], the same sequence the run loop uses.
//!
//! - `intro_flow` - onboarding redirects, steps and persistence
//! - `panel_flow` - side-panel closure on navigation and unmount, and what
//!   gets painted after it

mod panel_flow;

use ratatui::{Terminal, backend::TestBackend};

use rackview_core::AppPath;

use crate::App;
use crate::data::session_data::{DataConfig, UserRecord};
use crate::event::{AppKeyEvent, KeyCode};
use crate::state::{AppState, SessionState};

pub(crate) struct Harness {
    pub app: App,
    terminal: Terminal<TestBackend>,
}

impl Harness {
    pub fn new(state: AppState) -> Self {
        Self::with_app(App::new(state))
    }

    pub fn with_app(app: App) -> Self {
        let mut harness = Self {
            app,
            terminal: Terminal::new(TestBackend::new(120, 36)).unwrap(),
        };
        harness.settle();
        harness
    }

    /// Render and commit until the location stops moving.
    pub fn settle(&mut self) {
        for _ in 0..8 {
            self.app.mount_screen();
            self.app.sync_panel();
            self.terminal.draw(|frame| self.app.draw(frame)).unwrap();
            if !self.app.commit() {
                return;
            }
        }
        panic!("navigation did not settle at {}", self.path());
    }

    pub fn press(&mut self, key: AppKeyEvent) {
        self.app.handle_key_event(key);
        self.app.flush_effects();
        self.settle();
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(char_key(c));
        }
    }

    pub fn path(&self) -> &str {
        self.app.state().current_path().as_str()
    }

    pub fn panel_open(&self) -> bool {
        self.app.panels().store().is_open()
    }

    pub fn screen_text(&self) -> String {
        self.terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }
}

pub(crate) fn char_key(c: char) -> AppKeyEvent {
    AppKeyEvent {
        code: KeyCode::Char(c),
        ctrl: false,
        alt: false,
        shift: c.is_uppercase(),
    }
}

pub(crate) fn key(code: KeyCode) -> AppKeyEvent {
    AppKeyEvent::plain(code)
}

/// Signed in, with both intros in the state given.
pub(crate) fn session(is_admin: bool, completed_intro: bool, completed_user: bool) -> SessionState {
    let config = DataConfig {
        completed_intro,
        ..DataConfig::default()
    };
    let mut user = UserRecord::new(if is_admin { "admin" } else { "ops" }, is_admin);
    user.completed_user_intro = completed_user;
    SessionState::loaded(config, user)
}

pub(crate) fn state_at(path: &str, session: SessionState) -> AppState {
    let mut state = AppState::new(AppPath::new(path));
    state.session = session;
    state
}
