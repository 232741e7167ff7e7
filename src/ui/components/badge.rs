use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Indexing status of a connector, colored by outcome
#[must_use]
pub fn create_status_badge(last_status: Option<&str>, in_progress: bool, disabled: bool) -> Span<'static> {
    if disabled {
        return Span::styled("Paused", Style::default().fg(Color::DarkGray));
    }
    if in_progress {
        return Span::styled(
            "Indexing",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
    }

    match last_status {
        Some("success") => Span::styled("Succeeded", Style::default().fg(Color::Green)),
        Some("failed") => Span::styled("Failed", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Some("in_progress") | Some("not_started") => Span::styled("Scheduled", Style::default().fg(Color::Yellow)),
        Some(other) => Span::styled(other.to_string(), Style::default().fg(Color::Gray)),
        None => Span::styled("Not started", Style::default().fg(Color::Gray)),
    }
}

/// Whether the page's credential is attached to a connector
#[must_use]
pub fn create_linked_badge(linked: bool) -> Span<'static> {
    if linked {
        Span::styled("✓ linked", Style::default().fg(Color::Green))
    } else {
        Span::styled("✗ not linked", Style::default().fg(Color::Red))
    }
}
