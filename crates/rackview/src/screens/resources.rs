use std::collections::HashSet;

use crate::components::{Component, EventResult};
use crate::data::inventory::{Row, RowKey};
use crate::data::keybindings_data::KeybindingsConfig;
use crate::event::AppKeyEvent;
use crate::state::AppState;
use crate::util::styles::{
    FOCUS_COLOR, HEADER_COLOR, HELP_COLOR, SELECTED_COLOR, focused_block, focused_block_with_help,
};
use rackview_core::{AppPath, PanelController, Section, SidePanel};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::Screen;
use super::panel_keys::{Targets, panel_for_key};

/// List screen shared by every resource section.
pub struct ResourcesScreen {
    section: Section,
    panel: SidePanel,
    cursor: usize,
    selected: HashSet<RowKey>,
    list_state: ListState,
}

impl ResourcesScreen {
    pub fn new(section: Section, controller: &PanelController, location: &AppPath) -> Self {
        Self {
            section,
            panel: controller.use_side_panel(section.slug(), location),
            cursor: 0,
            selected: HashSet::new(),
            list_state: ListState::default(),
        }
    }

    /// Slug of the resource whose page is open, if not on the list itself.
    fn detail_slug<'a>(&self, path: &'a AppPath) -> Option<&'a str> {
        path.relative_to(&self.section.index_path())
            .filter(|rest| !rest.is_empty())
    }

    /// Rows a panel opened now would act on: the open resource, else the
    /// selection, else the row under the cursor.
    fn targets(&self, rows: &[Row], detail: Option<&str>) -> Vec<RowKey> {
        if let Some(slug) = detail {
            return rows
                .iter()
                .filter(|row| row.key.slug() == slug)
                .map(|row| row.key.clone())
                .collect();
        }
        if !self.selected.is_empty() {
            return rows
                .iter()
                .filter(|row| self.selected.contains(&row.key))
                .map(|row| row.key.clone())
                .collect();
        }
        rows.get(self.cursor)
            .map(|row| vec![row.key.clone()])
            .unwrap_or_default()
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, row: Option<&Row>, slug: &str) {
        let lines = match row {
            Some(row) => vec![
                Line::from(Span::styled(
                    row.name.clone(),
                    Style::default()
                        .fg(HEADER_COLOR)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(row.detail.clone()),
            ],
            None => vec![Line::from(format!("No {} called {slug}.", self.section.name()))],
        };
        let block = focused_block_with_help(" Details ", true, "Esc: back to list");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for ResourcesScreen {
    fn handle_key(&mut self, key: &AppKeyEvent, state: &mut AppState) -> EventResult {
        let rows = state.inventory.rows(self.section);
        let path = state.current_path().clone();
        let detail = self.detail_slug(&path);
        let nav = &state.keybindings.navigation;

        if KeybindingsConfig::matches(key, &nav.up) {
            self.cursor = self.cursor.saturating_sub(1);
            return EventResult::Handled;
        }
        if KeybindingsConfig::matches(key, &nav.down) {
            if self.cursor + 1 < rows.len() {
                self.cursor += 1;
            }
            return EventResult::Handled;
        }
        if KeybindingsConfig::matches(key, &nav.select) {
            if let Some(row) = rows.get(self.cursor)
                && !self.selected.remove(&row.key)
            {
                self.selected.insert(row.key.clone());
            }
            return EventResult::Handled;
        }
        if KeybindingsConfig::matches(key, &nav.confirm) {
            if detail.is_none()
                && let Some(row) = rows.get(self.cursor)
            {
                state.go_to(self.section.index_path().join(&row.key.slug()));
            }
            return EventResult::Handled;
        }
        if KeybindingsConfig::matches(key, &nav.cancel) {
            if !self.selected.is_empty() {
                self.selected.clear();
                return EventResult::Handled;
            }
            if detail.is_some() {
                state.go_to(self.section.index_path());
                return EventResult::Handled;
            }
            return EventResult::NotHandled;
        }

        let keys = self.targets(&rows, detail);
        let targets = Targets {
            rows: &keys,
            cursor: rows
                .get(self.cursor)
                .filter(|_| detail.is_none())
                .map(|row| &row.key),
            on_details: detail.is_some(),
        };
        match panel_for_key(
            self.section,
            key,
            &state.keybindings.panel,
            &targets,
            &state.inventory,
        ) {
            Ok(Some(content)) => {
                self.panel.open(content);
                state.clear_error();
                EventResult::Handled
            }
            Ok(None) => EventResult::NotHandled,
            Err(msg) => {
                state.set_error(msg.to_string());
                EventResult::Handled
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let rows = state.inventory.rows(self.section);
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));

        let detail = self.detail_slug(state.current_path());
        let list_area = match detail {
            Some(slug) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(4), Constraint::Min(0)])
                    .split(area);
                let row = rows.iter().find(|row| row.key.slug() == slug);
                self.render_detail(frame, chunks[0], row, slug);
                chunks[1]
            }
            None => area,
        };

        let name_width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);
        let items: Vec<ListItem> = if rows.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                format!("(no {})", self.section.name().to_lowercase()),
                Style::default().fg(HELP_COLOR),
            )))]
        } else {
            rows.iter()
                .map(|row| {
                    let selected = self.selected.contains(&row.key);
                    let marker = if selected { "[x] " } else { "[ ] " };
                    let name_style = if selected {
                        Style::default().fg(SELECTED_COLOR)
                    } else if detail == Some(row.key.slug().as_str()) {
                        Style::default().fg(FOCUS_COLOR)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(marker),
                        Span::styled(format!("{:<name_width$}  ", row.name), name_style),
                        Span::styled(row.detail.clone(), Style::default().fg(HELP_COLOR)),
                    ]))
                })
                .collect()
        };

        let title = if self.selected.is_empty() {
            format!(" {} ({}) ", self.section.name(), rows.len())
        } else {
            format!(
                " {} ({}, {} selected) ",
                self.section.name(),
                rows.len(),
                self.selected.len()
            )
        };

        let focused = detail.is_none() && !self.panel.is_open();
        let list = List::new(items)
            .block(focused_block(&title, focused))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        self.list_state
            .select((!rows.is_empty()).then_some(self.cursor));
        frame.render_stateful_widget(list, list_area, &mut self.list_state);
    }

    fn commit(&mut self, state: &mut AppState) {
        self.panel.sync_location(state.current_path());

        // Forget selections of rows that no longer exist
        if !self.selected.is_empty() {
            let rows = state.inventory.rows(self.section);
            self.selected
                .retain(|key| rows.iter().any(|row| &row.key == key));
        }
    }
}

impl Screen for ResourcesScreen {
    fn title(&self) -> &str {
        self.section.name()
    }
}
