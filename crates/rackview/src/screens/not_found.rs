use crate::components::{Component, EventResult};
use crate::event::AppKeyEvent;
use crate::state::AppState;
use crate::util::styles::{centered, focused_block};
use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use super::Screen;

pub struct NotFoundScreen;

impl Component for NotFoundScreen {
    fn handle_key(&mut self, _key: &AppKeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let lines = vec![
            Line::from(format!("Nothing lives at {}.", state.current_path())),
            Line::from(""),
            Line::from("Pick a section above or press Backspace to go back."),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(focused_block(" Not found ", false)),
            centered(area, 60, 7),
        );
    }
}

impl Screen for NotFoundScreen {
    fn title(&self) -> &str {
        "Not found"
    }
}
