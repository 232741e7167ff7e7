use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block<'a>(title: &'a str, theme_color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color))
}

/// Creates an input field block; the cursor block is drawn at `cursor` when focused
pub fn create_input_paragraph(value: &str, cursor: usize, field_title: &str, focused: bool) -> Paragraph<'static> {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    let line = if focused {
        let before: String = value.chars().take(cursor).collect();
        let after: String = value.chars().skip(cursor).collect();
        Line::from(vec![
            Span::raw(before),
            Span::styled("█", Style::default().fg(Color::Cyan)),
            Span::raw(after),
        ])
    } else {
        Line::from(value.to_string())
    };

    Paragraph::new(line).block(input_block).style(Style::default().fg(Color::White))
}

/// Creates a selection field block (read-only display with title)
pub fn create_selection_paragraph(value: Line<'static>, field_title: &str, focused: bool) -> Paragraph<'static> {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    Paragraph::new(value).block(block).style(Style::default().fg(Color::White))
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (i, (key, color, desc)) in instructions.iter().enumerate() {
        if i > 0 {
            instruction_text.push(Span::styled(" • ", Style::default().fg(Color::Gray)));
        }
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Common instruction shortcuts used across pages and dialogs
pub mod shortcuts {
    use super::*;

    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, " Cancel");
    pub const ENTER_SUBMIT: InstructionShortcut = ("Enter", Color::Green, " Submit");
    pub const TAB_NEXT: InstructionShortcut = ("Tab", Color::Cyan, " Next field");
    pub const SPACE_TOGGLE: InstructionShortcut = ("Space", Color::Cyan, " Toggle");
    pub const CTRL_T_TOOLTIP: InstructionShortcut = ("Ctrl+T", Color::Blue, " Field help");
    pub const CTRL_R_REFRESH: InstructionShortcut = ("Ctrl+R", Color::Yellow, " Refresh");
    pub const CTRL_P_PAGE: InstructionShortcut = ("Ctrl+P", Color::Magenta, " Switch page");
    pub const REFRESH: InstructionShortcut = ("r", Color::Yellow, " Refresh");
    pub const HELP: InstructionShortcut = ("?", Color::Blue, " Help");
    pub const QUIT: InstructionShortcut = ("q", Color::Red, " Quit");
}
