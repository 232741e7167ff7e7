//! Read-only summary table of connectors.

use crate::api::Connector;
use crate::ui::components::badge::{create_linked_badge, create_status_badge};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

/// One connector as shown in the summary table
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorRow {
    pub cc_pair_id: i64,
    pub name: String,
    pub last_status: Option<String>,
    pub in_progress: bool,
    pub requested_objects: String,
    pub credential_linked: bool,
    pub docs_indexed: u64,
    pub connector: Connector,
}

const HEADERS: [&str; 5] = ["Name", "Status", "Requested Objects", "Credential", "Docs"];

#[derive(Debug, Clone, Default)]
pub struct ConnectorTable {
    state: TableState,
}

impl ConnectorTable {
    pub fn new() -> Self {
        Self {
            state: TableState::default().with_selected(Some(0)),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Selected row, clamped to the current row count
    pub fn selected_row<'a>(&self, rows: &'a [ConnectorRow]) -> Option<&'a ConnectorRow> {
        let index = self.state.selected()?;
        rows.get(index.min(rows.len().saturating_sub(1)))
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let index = self.state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.state.select(Some(index));
    }

    pub fn previous(&mut self) {
        let index = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(index));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, rows: &[ConnectorRow]) {
        if let Some(selected) = self.state.selected() {
            if selected >= rows.len() {
                self.state.select(Some(rows.len().saturating_sub(1)));
            }
        }

        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let body = rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(Line::from(create_status_badge(
                    row.last_status.as_deref(),
                    row.in_progress,
                    row.connector.disabled,
                ))),
                Cell::from(row.requested_objects.clone()),
                Cell::from(Line::from(create_linked_badge(row.credential_linked))),
                Cell::from(row.docs_indexed.to_string()),
            ])
        });

        let table = Table::new(
            body,
            [
                Constraint::Percentage(25),
                Constraint::Length(12),
                Constraint::Percentage(40),
                Constraint::Length(14),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.state);
    }
}
