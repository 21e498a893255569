use super::{Component, EventResult};
use crate::data::keybindings_data::KeybindingsConfig;
use crate::event::{AppKeyEvent, KeyCode};
use crate::state::AppState;
use rackview_core::Section;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

pub struct NavBar;

impl NavBar {
    fn step(state: &AppState, forward: bool) -> Section {
        let count = Section::NAVIGABLE.len();
        let next = match state.active_section().and_then(|s| s.nav_index()) {
            Some(idx) if forward => (idx + 1) % count,
            Some(idx) => (idx + count - 1) % count,
            None if forward => 0,
            None => count - 1,
        };
        Section::NAVIGABLE[next]
    }
}

impl Component for NavBar {
    fn handle_key(&mut self, key: &AppKeyEvent, state: &mut AppState) -> EventResult {
        let global = &state.keybindings.global;

        let target = if KeybindingsConfig::matches(key, &global.next_section) {
            Self::step(state, true)
        } else if KeybindingsConfig::matches(key, &global.prev_section) || key.is_back_tab() {
            Self::step(state, false)
        } else if let KeyCode::Char(c @ '1'..='9') = key.code
            && key.no_modifiers()
        {
            let idx = c as usize - '1' as usize;
            match Section::from_nav_index(idx) {
                Some(section) => section,
                None => return EventResult::NotHandled,
            }
        } else {
            return EventResult::NotHandled;
        };

        state.go_to(target.index_path());
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let active = state.active_section();
        let titles: Vec<Line> = Section::NAVIGABLE
            .iter()
            .enumerate()
            .map(|(idx, section)| {
                let content = format!("[{}] {}", idx + 1, section.name());

                if Some(*section) == active {
                    Line::from(Span::styled(
                        content,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(content, Style::default().fg(Color::Gray)))
                }
            })
            .collect();

        let region = state
            .session
            .config
            .as_ref()
            .map_or("rackview", |c| c.region_name.as_str());

        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .title(format!(" {region} ")),
            )
            .select(active.and_then(|s| s.nav_index()))
            .style(Style::default())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }
}
