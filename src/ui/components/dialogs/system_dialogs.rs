use crate::constants::DIALOG_TITLE_DEBUG_LOGS;
use crate::logger::Logger;
use crate::ui::components::dialogs::common::{create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

const HELP_TEXT: &str = r"
INDEXADMIN - Indexing Platform Admin Console
============================================

PAGES
-----
1           New bot configuration
2           Salesforce KB Articles connector
Ctrl+P      Next page

FORMS
-----
Tab/↓       Next field
Shift+Tab/↑ Previous field
←/→         Move cursor, change selection
Space       Toggle option
Enter       Submit
Esc         Cancel editing
Ctrl+T      Show help for the focused field

SALESFORCE CONNECTOR
--------------------
j/k         Select connector row
e           Edit requested objects of the selected connector
l           Link the credential to the selected connector
d           Delete the credential (with confirmation)
i           Explain the summary table

GENERAL
-------
r, Ctrl+R   Reload data of the current page
G, Ctrl+G   Show logs
?, F1       Show this help
q, Ctrl+C   Quit

Letter shortcuts are ignored while a text field has focus;
the Ctrl variants always work.

Press 'Esc' to close this help
";

/// Draw `lines` into `area` starting at `scroll_offset`, with a scrollbar
/// when they do not fit.
fn render_scrolled_lines(
    f: &mut Frame,
    area: Rect,
    lines: &[&str],
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) {
    let total_lines = lines.len();
    let visible_height = area.height as usize;
    let clamped_offset = scroll_offset.min(total_lines.saturating_sub(visible_height));

    *scrollbar_state = scrollbar_state
        .content_length(total_lines)
        .viewport_content_length(visible_height)
        .position(clamped_offset);

    let visible: Vec<&str> = lines.iter().skip(clamped_offset).take(visible_height).copied().collect();
    f.render_widget(
        Paragraph::new(visible.join("\n")).style(Style::default().fg(Color::White)),
        area,
    );

    if total_lines > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("▐")
            .style(Style::default().fg(Color::Gray))
            .thumb_style(Style::default().fg(Color::White));

        f.render_stateful_widget(scrollbar, area, scrollbar_state);
    }
}

fn render_message_dialog(f: &mut Frame, area: Rect, title: &str, color: Color, message: &str) {
    let dialog_area = LayoutManager::centered_rect_lines(60, 9, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(title, color);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new("Press any key to continue")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

pub fn render_error_dialog(f: &mut Frame, area: Rect, message: &str) {
    render_message_dialog(f, area, " Error ", Color::Red, message);
}

pub fn render_info_dialog(f: &mut Frame, area: Rect, message: &str) {
    render_message_dialog(f, area, " Info ", Color::Blue, message);
}

pub fn render_confirm_delete_credential_dialog(f: &mut Frame, area: Rect, credential_id: i64) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 7, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(" ⚠ Confirm Delete ", Color::Red);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(inner);
    let message = format!(
        "Delete credential {}?\nConnectors using it stop indexing until a new credential is linked.",
        credential_id
    );
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(
        create_instructions_paragraph(&[("Enter/y", Color::Green, " Delete"), shortcuts::ESC_CANCEL]),
        chunks[1],
    );
}

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll_offset: usize, scrollbar_state: &mut ScrollbarState) {
    let help_area = LayoutManager::centered_rect(80, 90, area);
    f.render_widget(Clear, help_area);

    let block = create_dialog_block(" 📖 Help ", Color::White);
    let inner = block.inner(help_area);
    f.render_widget(block, help_area);

    let lines: Vec<&str> = HELP_TEXT.lines().collect();
    render_scrolled_lines(f, inner, &lines, scroll_offset, scrollbar_state);
}

pub fn render_logs_dialog(
    f: &mut Frame,
    area: Rect,
    logger: &Logger,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, logs_area);

    let block = create_dialog_block(DIALOG_TITLE_DEBUG_LOGS, Color::White);
    let inner = block.inner(logs_area);
    f.render_widget(block, logs_area);

    let logs = logger.get_logs();
    if logs.is_empty() {
        f.render_widget(
            Paragraph::new("No logs yet").style(Style::default().fg(Color::Gray)),
            inner,
        );
        return;
    }

    let lines: Vec<&str> = logs.iter().map(String::as_str).collect();
    render_scrolled_lines(f, inner, &lines, scroll_offset, scrollbar_state);
}
