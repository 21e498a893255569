//! Onboarding flow.
//!
//! The guard is evaluated on every render. What it decides about navigation is
//! kept until [`Component::commit`] and only then registered, so a render
//! never moves the console by itself.

use jiff::Timestamp;
use rackview_core::{IntroGuard, IntroStep, NavigationDecision, RenderChoice};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::Screen;
use super::loading::render_session_card;
use crate::components::{Component, EventResult};
use crate::data::keybindings_data::KeybindingsConfig;
use crate::event::{AppKeyEvent, KeyCode};
use crate::state::AppState;
use crate::util::styles::{
    HEADER_COLOR, HELP_COLOR, SELECTED_COLOR, centered, focused_block,
    focused_block_with_help,
};

/// Image releases offered on the images step.
pub const IMAGE_RELEASES: [&str; 4] = [
    "24.04 LTS (noble)",
    "22.04 LTS (jammy)",
    "20.04 LTS (focal)",
    "CentOS Stream 9",
];

pub struct IntroScreen {
    guard: IntroGuard,
    /// Navigation decided by the last render, not yet registered
    pending: Option<NavigationDecision>,
    /// Step shown by the last render
    step: Option<IntroStep>,
    region_draft: Option<String>,
    image_picks: Option<Vec<String>>,
    image_cursor: usize,
    ssh_key_draft: String,
}

impl IntroScreen {
    pub fn new(guard: IntroGuard) -> Self {
        Self {
            guard,
            pending: None,
            step: None,
            region_draft: None,
            image_picks: None,
            image_cursor: 0,
            ssh_key_draft: String::new(),
        }
    }

    /// Step the current facts allow input on. None while loading, blocked,
    /// about to redirect, or at an unknown intro path.
    fn active_step(&self, state: &AppState) -> Option<IntroStep> {
        let outcome = self.guard.evaluate(&state.facts());
        match (outcome.render, outcome.decision) {
            (RenderChoice::Step(path), NavigationDecision::None) => {
                self.guard.routes().step_for(&path)
            }
            _ => None,
        }
    }

    fn region_name(&self, state: &AppState) -> String {
        self.region_draft.clone().unwrap_or_else(|| {
            state
                .session
                .config
                .as_ref()
                .map(|c| c.region_name.clone())
                .unwrap_or_default()
        })
    }

    fn image_picks(&self, state: &AppState) -> Vec<String> {
        self.image_picks.clone().unwrap_or_else(|| {
            state
                .session
                .config
                .as_ref()
                .map(|c| c.images.clone())
                .unwrap_or_default()
        })
    }

    /// Move on to the step after `step`, if the flow has one.
    fn advance(&self, step: IntroStep, state: &mut AppState) {
        if let Some(next) = step.next() {
            state.go_to(self.guard.routes().path_for(next).clone());
        }
    }

    fn handle_step_key(
        &mut self,
        step: IntroStep,
        key: &AppKeyEvent,
        state: &mut AppState,
    ) -> EventResult {
        let nav = state.keybindings.navigation.clone();
        let confirm = KeybindingsConfig::matches(key, &nav.confirm);
        let typed = match key.code {
            KeyCode::Char(c) if !key.ctrl && !key.alt => Some(c),
            _ => None,
        };
        let erase = key.code == KeyCode::Backspace;

        match step {
            IntroStep::Index => {
                if let Some(c) = typed {
                    let mut name = self.region_name(state);
                    name.push(c);
                    self.region_draft = Some(name);
                } else if erase {
                    let mut name = self.region_name(state);
                    name.pop();
                    self.region_draft = Some(name);
                } else if confirm {
                    let name = self.region_name(state).trim().to_string();
                    if name.is_empty() {
                        state.set_error("The region needs a name".to_string());
                        return EventResult::Handled;
                    }
                    if let Some(config) = state.session.config_mut() {
                        config.region_name = name;
                    }
                    state.clear_error();
                    self.advance(step, state);
                } else {
                    return EventResult::NotHandled;
                }
            }
            IntroStep::Images => {
                if KeybindingsConfig::matches(key, &nav.up) {
                    self.image_cursor = self.image_cursor.saturating_sub(1);
                } else if KeybindingsConfig::matches(key, &nav.down) {
                    self.image_cursor = (self.image_cursor + 1).min(IMAGE_RELEASES.len() - 1);
                } else if KeybindingsConfig::matches(key, &nav.select) {
                    let mut picks = self.image_picks(state);
                    let release = IMAGE_RELEASES[self.image_cursor].to_string();
                    match picks.iter().position(|p| p == &release) {
                        Some(idx) => {
                            picks.remove(idx);
                        }
                        None => picks.push(release),
                    }
                    self.image_picks = Some(picks);
                } else if confirm {
                    let picks = self.image_picks(state);
                    if picks.is_empty() {
                        state.set_error("Select at least one image".to_string());
                        return EventResult::Handled;
                    }
                    if let Some(config) = state.session.config_mut() {
                        config.images = picks;
                    }
                    state.clear_error();
                    self.advance(step, state);
                } else {
                    return EventResult::NotHandled;
                }
            }
            IntroStep::Success => {
                if !confirm {
                    return EventResult::NotHandled;
                }
                // The guard moves on to the user step once this lands
                state.session.complete_intro(Timestamp::now());
            }
            IntroStep::UserIntro => {
                if let Some(c) = typed {
                    self.ssh_key_draft.push(c);
                } else if erase {
                    self.ssh_key_draft.pop();
                } else if confirm {
                    let key_source = self.ssh_key_draft.trim().to_string();
                    if key_source.is_empty() {
                        state.set_error("Import an SSH key to continue".to_string());
                        return EventResult::Handled;
                    }
                    if let Some(user) = state.session.user_mut() {
                        user.ssh_key = Some(key_source);
                    }
                    state.clear_error();
                    state.session.complete_user_intro(Timestamp::now());
                } else {
                    return EventResult::NotHandled;
                }
            }
        }
        EventResult::Handled
    }

    fn step_lines(&self, step: IntroStep, state: &AppState) -> Vec<Line<'static>> {
        let hint = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(HELP_COLOR),
            ))
        };

        match step {
            IntroStep::Index => vec![
                Line::from("Name this region. It is shown at the top of the console."),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Region name: "),
                    Span::styled(
                        format!("{}_", self.region_name(state)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                hint("Type to edit | Enter: continue"),
            ],
            IntroStep::Images => {
                let picks = self.image_picks(state);
                let mut lines = vec![
                    Line::from("Pick the images machines can be deployed with."),
                    Line::from(""),
                ];
                for (idx, release) in IMAGE_RELEASES.iter().enumerate() {
                    let picked = picks.iter().any(|p| p == release);
                    let marker = if picked { "[x] " } else { "[ ] " };
                    let mut style = if picked {
                        Style::default().fg(SELECTED_COLOR)
                    } else {
                        Style::default()
                    };
                    if idx == self.image_cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    lines.push(Line::from(Span::styled(format!("{marker}{release}"), style)));
                }
                lines.push(Line::from(""));
                lines.push(hint("j/k: move | Space: toggle | Enter: continue"));
                lines
            }
            IntroStep::Success => {
                let images = self.image_picks(state);
                vec![
                    Line::from(format!("Region: {}", self.region_name(state))),
                    Line::from(format!("Images: {}", images.join(", "))),
                    Line::from(""),
                    hint("Enter: finish setup"),
                ]
            }
            IntroStep::UserIntro => vec![
                Line::from(format!(
                    "Welcome, {}. Import an SSH key to log in to deployed machines.",
                    state.session.username().unwrap_or("user")
                )),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Key source (gh:user or lp:user): "),
                    Span::styled(
                        format!("{}_", self.ssh_key_draft),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                hint("Type to edit | Enter: import and finish"),
            ],
        }
    }
}

impl Component for IntroScreen {
    fn handle_key(&mut self, key: &AppKeyEvent, state: &mut AppState) -> EventResult {
        match self.active_step(state) {
            Some(step) => self.handle_step_key(step, key, state),
            None => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let outcome = self.guard.evaluate(&state.facts());
        self.pending = Some(outcome.decision);
        self.step = None;

        let card = centered(area, 72, 14);
        match outcome.render {
            RenderChoice::Loading => {
                render_session_card(frame, area, state.session.load_error.as_deref());
            }
            RenderChoice::Blocked => {
                let lines = vec![
                    Line::from("This region has not been set up yet."),
                    Line::from(""),
                    Line::from(
                        "An administrator needs to finish the setup before you can continue.",
                    ),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .block(focused_block(" Setup incomplete ", false))
                        .wrap(Wrap { trim: true }),
                    card,
                );
            }
            RenderChoice::Step(path) => match self.guard.routes().step_for(&path) {
                Some(step) => {
                    self.step = Some(step);
                    let number = IntroStep::ALL.iter().position(|s| *s == step).unwrap_or(0) + 1;
                    let title = format!(
                        " Step {number} of {}: {} ",
                        IntroStep::ALL.len(),
                        step.title()
                    );

                    let mut lines = vec![
                        Line::from(Span::styled(
                            step.title().to_string(),
                            Style::default()
                                .fg(HEADER_COLOR)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                    ];
                    lines.extend(self.step_lines(step, state));

                    frame.render_widget(
                        Paragraph::new(lines)
                            .block(focused_block_with_help(&title, true, "Ctrl+C: quit"))
                            .wrap(Wrap { trim: false }),
                        card,
                    );
                }
                None => {
                    let lines = vec![
                        Line::from(format!("There is no setup step at {path}.")),
                        Line::from(""),
                        Line::from("Press F2 to return to the start of the setup."),
                    ];
                    frame.render_widget(
                        Paragraph::new(lines).block(focused_block(" Not found ", false)),
                        card,
                    );
                }
            },
        }
    }

    fn commit(&mut self, state: &mut AppState) {
        let Some(decision) = self.pending.take() else {
            return;
        };
        if let Some(target) = decision.target() {
            tracing::info!(from = %state.current_path(), to = %target, "Intro redirect");
        }
        state.effects.defer_navigation(&decision);
    }
}

impl Screen for IntroScreen {
    fn title(&self) -> &str {
        "Setup"
    }

    fn captures_text(&self) -> bool {
        matches!(self.step, Some(IntroStep::Index | IntroStep::UserIntro))
    }
}
