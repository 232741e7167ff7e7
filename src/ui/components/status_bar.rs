//! Status bar component

use crate::ui::components::dialogs::common::{create_instructions_paragraph, InstructionShortcut};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// One-line footer: running background work on the left, key hints on the right
pub struct StatusBar;

impl StatusBar {
    pub fn text(active_tasks: &[String]) -> Option<String> {
        match active_tasks {
            [] => None,
            [only] => Some(format!("⏳ {}...", only)),
            [first, rest @ ..] => Some(format!("⏳ {}... (+{} more)", first, rest.len())),
        }
    }

    pub fn render(f: &mut Frame, area: Rect, active_tasks: &[String], shortcuts: &[InstructionShortcut]) {
        let chunks = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).split(area);

        if let Some(text) = Self::text(active_tasks) {
            f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::Yellow)), chunks[0]);
        }
        f.render_widget(create_instructions_paragraph(shortcuts), chunks[1]);
    }
}
