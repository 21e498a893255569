//! Card shown while the session is loading, or after the load failed.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::util::styles::{ERROR_COLOR, centered, focused_block};

pub fn render_session_card(frame: &mut Frame, area: Rect, load_error: Option<&str>) {
    let line = match load_error {
        Some(err) => Line::from(Span::styled(
            format!("Could not load the session: {err}"),
            Style::default().fg(ERROR_COLOR),
        )),
        None => Line::from("Loading..."),
    };
    frame.render_widget(
        Paragraph::new(line)
            .block(focused_block(" Setup ", false))
            .wrap(Wrap { trim: true }),
        centered(area, 72, 6),
    );
}
