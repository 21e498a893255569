use super::{Component, EventResult};
use crate::event::AppKeyEvent;
use crate::router::Route;
use crate::state::AppState;
use crate::util::styles::{ERROR_COLOR, HELP_COLOR};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rackview_core::{PanelStore, Section};

pub struct StatusBar {
    /// Read-only view of the side-panel slot
    panel: PanelStore,
}

impl StatusBar {
    pub fn new(panel: PanelStore) -> Self {
        Self { panel }
    }

    fn help_text(state: &AppState, panel_open: bool) -> &'static str {
        if panel_open {
            return "Enter: confirm | Esc: close panel | Tab: section | q: quit";
        }
        match state.route() {
            Route::Intro => "Enter: continue | F2: intro | q: quit",
            Route::NotFound => "Tab/1-9: section | Backspace: back | q: quit",
            Route::Resources(section) => match section {
                Section::Machines => {
                    "j/k: nav | Space: select | a: add | c/D/r/t: commission/deploy/release/test | o/O: power | z: zone | g: tag | L: lock | b: broken | C: clone | d: delete"
                }
                Section::Controllers => "j/k: nav | Space: select | a: add | t: test | o/O: power | z: zone | g: tag | d: delete",
                Section::Devices => "j/k: nav | Space: select | a: add | z: zone | d: delete",
                Section::Kvm => "j/k: nav | a/A: add LXD/virsh | e: compose | R: refresh | d: delete",
                Section::Networks => {
                    "j/k: nav | a: subnet | A: VLAN | f: fabric | s: space | e: edit | d: delete"
                }
                Section::Tags => "j/k: nav | Enter: details | a: add | e: edit | d: delete",
                Section::Zones => "j/k: nav | a: add | d: delete",
                Section::Domains => "j/k: nav | a: add | A: record | S: set default | d: delete",
                Section::Dashboard => "j/k: nav | Space: select | a: add as device | d: delete | X: clear all",
                Section::Intro => "",
            },
        }
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: &AppKeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(ERROR_COLOR)),
                Span::raw(error.as_str()),
            ])
        } else if let Some(status) = &state.status_message {
            Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Green)))
        } else {
            Line::from(Span::styled(
                Self::help_text(state, self.panel.is_open()),
                Style::default().fg(HELP_COLOR),
            ))
        };

        let user = match state.session.username() {
            Some(name) if state.session.is_admin() => format!("{name} (admin)"),
            Some(name) => name.to_string(),
            None => "signing in...".to_string(),
        };

        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(user.len() as u16 + 1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(content), chunks[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(user, Style::default().fg(HELP_COLOR)))),
            chunks[1],
        );
    }
}
