use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use rackview_core::{AppPath, Effect, IntroGuard, PanelController, Section};

use crate::components::{
    Component, EventResult, nav_bar::NavBar, side_panel::SidePanelChrome, status_bar::StatusBar,
};
use crate::data::keybindings_data::KeybindingsConfig;
use crate::data::storage::DataDirectory;
use crate::event::AppKeyEvent;
use crate::router::Route;
use crate::screens::{
    Screen, intro::IntroScreen, loading::render_session_card, not_found::NotFoundScreen,
    resources::ResourcesScreen,
};
use crate::state::AppState;
use crate::worker::{LoadRequest, LoadResponse, SessionWorker};

/// How long to wait for input before redrawing, so background loads show up.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Guard redirects settle in a couple of passes; more means a cycle.
const MAX_SETTLE_PASSES: usize = 8;

/// Startup options collected by the binary
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub data_dir: PathBuf,
    /// Sign in as this user instead of the configured one
    pub user: Option<String>,
    pub initial_path: AppPath,
    /// Artificial latency for each half of the session load
    pub load_delay_ms: u64,
}

struct MountedScreen {
    route: Route,
    screen: Box<dyn Screen>,
}

pub struct App {
    state: AppState,
    // Declared before `side_panel` so the screen is dropped first
    screen: Option<MountedScreen>,
    side_panel: SidePanelChrome,
    nav_bar: NavBar,
    status_bar: StatusBar,
    panels: PanelController,
    guard: IntroGuard,
    worker: Option<SessionWorker>,
}

impl App {
    /// Build the app around `state` without a background loader.
    pub fn new(state: AppState) -> Self {
        let panels = PanelController::new();
        let side_panel = SidePanelChrome::new(&panels, state.current_path());
        let status_bar = StatusBar::new(panels.store().clone());

        Self {
            state,
            screen: None,
            side_panel,
            nav_bar: NavBar,
            status_bar,
            panels,
            guard: IntroGuard::default(),
            worker: None,
        }
    }

    /// Start the console over a data directory; the session loads in the
    /// background.
    pub fn launch(options: LaunchOptions) -> Self {
        let storage = DataDirectory::new(options.data_dir);
        if let Err(e) = storage.init() {
            tracing::warn!(error = %e, "Data directory unavailable");
        }

        let mut state = AppState::new(options.initial_path);
        state.keybindings = storage.load_keybindings();
        state.storage = Some(storage.clone());

        let worker = SessionWorker::new(storage);
        worker.send(LoadRequest::Session {
            requested_user: options.user,
            delay: Duration::from_millis(options.load_delay_ms),
        });

        tracing::info!(path = %state.current_path(), "Console starting");

        let mut app = Self::new(state);
        app.worker = Some(worker);
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Read-only view of the side-panel slot.
    pub fn panels(&self) -> &PanelController {
        &self.panels
    }
}

impl App {
    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            self.poll_worker();

            let mut passes = 0;
            loop {
                self.mount_screen();
                self.sync_panel();
                terminal.draw(|frame| self.draw(frame))?;
                passes += 1;
                if !self.commit() {
                    break;
                }
                if passes >= MAX_SETTLE_PASSES {
                    tracing::warn!(path = %self.state.current_path(), "Navigation did not settle");
                    break;
                }
            }

            self.handle_events()?;
        }

        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
        Ok(())
    }

    pub(crate) fn poll_worker(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        while let Some(response) = worker.try_recv() {
            match response {
                LoadResponse::ConfigLoaded(config) => {
                    tracing::debug!("Config loaded");
                    self.state.session.config = Some(config);
                }
                LoadResponse::UserLoaded(user) => {
                    self.state.session.user = Some(user);
                }
                LoadResponse::Error(msg) => {
                    self.state.session.load_error = Some(msg.clone());
                    self.state.set_error(msg);
                }
            }
        }
    }

    /// Mount the screen for the current route, unmounting the previous one
    /// when the route changed.
    pub(crate) fn mount_screen(&mut self) {
        let route = self.state.route();
        if self.screen.as_ref().is_some_and(|m| m.route == route) {
            return;
        }

        // Unmount first: dropping a screen releases its hold on the panel
        self.screen = None;

        let location = self.state.current_path().clone();
        let screen: Box<dyn Screen> = match route {
            Route::Resources(section) => {
                Box::new(ResourcesScreen::new(section, &self.panels, &location))
            }
            Route::Intro => Box::new(IntroScreen::new(self.guard.clone())),
            Route::NotFound => Box::new(NotFoundScreen),
        };
        tracing::debug!(screen = screen.title(), %location, "Screen mounted");
        self.screen = Some(MountedScreen { route, screen });
    }

    /// Bring the panel in line with the current location before painting.
    /// Moving between pages of one section keeps the screen mounted, so the
    /// chrome is the only thing that notices.
    pub(crate) fn sync_panel(&mut self) {
        let location = self.state.current_path().clone();
        self.side_panel.sync_location(&location);
    }

    /// Outside the intro flow nothing is usable until the session has
    /// loaded. A failed load keeps it that way.
    fn session_gated(&self) -> bool {
        self.state.route() != Route::Intro && self.state.facts().is_loading()
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        // Create main layout: nav bar, content, status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Nav bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.nav_bar.render(frame, chunks[0], &self.state);
        self.render_body(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2], &self.state);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect) {
        if self.session_gated() {
            render_session_card(frame, area, self.state.session.load_error.as_deref());
            return;
        }

        let (screen_area, panel_area) = if self.side_panel.is_open() {
            let width = self.side_panel.width().min(area.width / 2 + area.width / 4);
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(width)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        if let Some(mounted) = &mut self.screen {
            mounted.screen.render(frame, screen_area, &self.state);
        }
        if let Some(panel_area) = panel_area {
            self.side_panel.render(frame, panel_area, &self.state);
        }
    }

    /// Post-render phase: let components register what the render decided,
    /// then apply it. Returns true when the location or the panel changed,
    /// so the caller renders again before waiting for input.
    pub(crate) fn commit(&mut self) -> bool {
        let revision = self.panels.store().revision();
        if let Some(mounted) = &mut self.screen {
            mounted.screen.commit(&mut self.state);
        }
        self.side_panel.commit(&mut self.state);

        if self.state.route() != Route::Intro {
            let decision = self.guard.entry_redirect(&self.state.facts());
            if let Some(target) = decision.target() {
                tracing::info!(from = %self.state.current_path(), to = %target, "Intro required");
            }
            self.state.effects.defer_navigation(&decision);
        }

        let moved = self.flush_effects();
        moved || self.panels.store().revision() != revision
    }

    /// Apply deferred effects in the order they were registered.
    pub(crate) fn flush_effects(&mut self) -> bool {
        let before = self.state.current_path().clone();

        let effects: Vec<Effect> = self.state.effects.drain().collect();
        for effect in effects {
            match effect {
                Effect::SetPanel(content) => self.side_panel.set_content(content),
                Effect::Navigate { to, replace } => self.state.router.navigate(to, replace),
            }
        }

        self.state.persist_session();
        self.state.current_path() != &before
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(AppKeyEvent::from(key_event));
                self.flush_effects();
            }
            _ => {}
        };
        Ok(())
    }

    pub(crate) fn handle_key_event(&mut self, key: AppKeyEvent) {
        self.state.status_message = None;
        // Only globals and the nav bar work until the session is in
        let gated = self.session_gated();

        // Free text goes to the screen before anything can claim it
        if let Some(mounted) = &mut self.screen
            && !gated
            && mounted.screen.captures_text()
            && mounted.screen.handle_key(&key, &mut self.state) != EventResult::NotHandled
        {
            return;
        }

        // Then the side panel, while one is open
        if !gated
            && self.side_panel.handle_key(&key, &mut self.state) != EventResult::NotHandled {
            return;
        }

        // Global key bindings
        let global = &self.state.keybindings.global;
        if KeybindingsConfig::matches(&key, &global.quit) {
            self.state.exit = true;
            return;
        }
        if KeybindingsConfig::matches(&key, &global.back) {
            self.state.router.back();
            return;
        }
        if KeybindingsConfig::matches(&key, &global.intro) {
            self.state.go_to(Section::Intro.index_path());
            return;
        }
        if key.code == KeyCode::Esc && self.state.error_message.is_some() {
            self.state.clear_error();
            return;
        }

        // Try nav bar first
        let result = self.nav_bar.handle_key(&key, &mut self.state);
        if result != EventResult::NotHandled {
            return;
        }

        // Then the active screen
        let result = match &mut self.screen {
            Some(mounted) if !gated => mounted.screen.handle_key(&key, &mut self.state),
            _ => EventResult::NotHandled,
        };

        if result == EventResult::Exit {
            self.state.exit = true
        }
    }
}
