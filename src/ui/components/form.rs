//! Keyboard-driven forms.
//!
//! A [`Form`] is a vertical list of [`FormField`]s with one focused field.
//! Tab/Shift+Tab (or Up/Down) move focus, Enter validates and submits,
//! Esc cancels. Values come back as [`FormValues`] keyed by field key.

use crate::ui::components::card_section::CardSection;
use crate::ui::components::dialogs::common::{
    create_input_paragraph, create_instructions_paragraph, create_selection_paragraph, shortcuts,
    InstructionShortcut,
};
use crate::ui::components::tooltip::{TooltipContent, TooltipProvider, TooltipTrigger};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Text shown masked
    Secret,
    /// Comma separated values
    List,
    Toggle,
    Select(Vec<String>),
    MultiSelect(Vec<String>),
}

impl FieldKind {
    fn is_textual(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Secret | FieldKind::List)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    Choice(usize),
    Choices(Vec<usize>),
}

/// Split a comma separated list, dropping blank entries
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct FormField {
    key: &'static str,
    label: String,
    kind: FieldKind,
    required: bool,
    help: Option<String>,
    text: String,
    cursor: usize,
    toggled: bool,
    selected: usize,
    chosen: BTreeSet<usize>,
}

impl FormField {
    fn new(key: &'static str, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            required: false,
            help: None,
            text: String::new(),
            cursor: 0,
            toggled: false,
            selected: 0,
            chosen: BTreeSet::new(),
        }
    }

    pub fn text(key: &'static str, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn secret(key: &'static str, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Secret)
    }

    pub fn list(key: &'static str, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::List)
    }

    pub fn toggle(key: &'static str, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Toggle)
    }

    pub fn select(key: &'static str, label: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(key, label, FieldKind::Select(options))
    }

    pub fn multi_select(key: &'static str, label: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(key, label, FieldKind::MultiSelect(options))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.cursor = self.text.chars().count();
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn value(&self) -> FormValue {
        match &self.kind {
            FieldKind::Text | FieldKind::Secret => FormValue::Text(self.text.trim().to_string()),
            FieldKind::List => FormValue::List(parse_list(&self.text)),
            FieldKind::Toggle => FormValue::Bool(self.toggled),
            FieldKind::Select(_) => FormValue::Choice(self.selected),
            FieldKind::MultiSelect(_) => FormValue::Choices(self.chosen.iter().copied().collect()),
        }
    }

    fn is_missing(&self) -> bool {
        if !self.required {
            return false;
        }
        match self.value() {
            FormValue::Text(text) => text.is_empty(),
            FormValue::List(items) => items.is_empty(),
            FormValue::Choices(items) => items.is_empty(),
            FormValue::Bool(_) | FormValue::Choice(_) => false,
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(index, _)| index)
    }

    fn option_count(&self) -> usize {
        match &self.kind {
            FieldKind::Select(options) | FieldKind::MultiSelect(options) => options.len(),
            _ => 0,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.kind.is_textual() {
            match key.code {
                KeyCode::Char(c) => {
                    let index = self.byte_index(self.cursor);
                    self.text.insert(index, c);
                    self.cursor += 1;
                }
                KeyCode::Backspace if self.cursor > 0 => {
                    self.cursor -= 1;
                    let index = self.byte_index(self.cursor);
                    self.text.remove(index);
                }
                KeyCode::Delete if self.cursor < self.text.chars().count() => {
                    let index = self.byte_index(self.cursor);
                    self.text.remove(index);
                }
                KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
                KeyCode::Right => self.cursor = (self.cursor + 1).min(self.text.chars().count()),
                KeyCode::Home => self.cursor = 0,
                KeyCode::End => self.cursor = self.text.chars().count(),
                _ => {}
            }
            return;
        }

        let count = self.option_count();
        match (&self.kind, key.code) {
            (FieldKind::Toggle, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => self.toggled = !self.toggled,
            (_, KeyCode::Left | KeyCode::Char('h')) if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            (_, KeyCode::Right | KeyCode::Char('l')) if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            (FieldKind::MultiSelect(_), KeyCode::Char(' ')) if count > 0 => {
                if !self.chosen.remove(&self.selected) {
                    self.chosen.insert(self.selected);
                }
            }
            _ => {}
        }
    }

    fn display_line(&self, focused: bool) -> Line<'static> {
        match &self.kind {
            FieldKind::Toggle => {
                let (mark, text) = if self.toggled { ("[x]", " Yes") } else { ("[ ]", " No") };
                Line::from(vec![
                    Span::styled(mark, Style::default().fg(Color::Cyan)),
                    Span::raw(text),
                ])
            }
            FieldKind::Select(options) => {
                let current = options.get(self.selected).cloned().unwrap_or_default();
                Line::from(vec![
                    Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
                    Span::raw(current),
                    Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
                ])
            }
            FieldKind::MultiSelect(options) => {
                if options.is_empty() {
                    return Line::from(Span::styled("(none available)", Style::default().fg(Color::DarkGray)));
                }
                let mut spans = Vec::new();
                for (index, option) in options.iter().enumerate() {
                    if index > 0 {
                        spans.push(Span::raw("  "));
                    }
                    let mark = if self.chosen.contains(&index) { "[x] " } else { "[ ] " };
                    let mut style = Style::default();
                    if focused && index == self.selected {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled(format!("{}{}", mark, option), style));
                }
                Line::from(spans)
            }
            _ => Line::from(self.text.clone()),
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let title = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };

        match &self.kind {
            FieldKind::Text | FieldKind::List => {
                f.render_widget(create_input_paragraph(&self.text, self.cursor, &title, focused), area);
            }
            FieldKind::Secret => {
                let masked = "•".repeat(self.text.chars().count());
                f.render_widget(create_input_paragraph(&masked, self.cursor, &title, focused), area);
            }
            _ => {
                f.render_widget(create_selection_paragraph(self.display_line(focused), &title, focused), area);
            }
        }
    }
}

/// Values of a submitted form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValues {
    values: HashMap<&'static str, FormValue>,
}

impl FormValues {
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(FormValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        match self.values.get(key) {
            Some(FormValue::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FormValue::Bool(true)))
    }

    pub fn choice(&self, key: &str) -> Option<usize> {
        match self.values.get(key) {
            Some(FormValue::Choice(index)) => Some(*index),
            _ => None,
        }
    }

    pub fn choices(&self, key: &str) -> Vec<usize> {
        match self.values.get(key) {
            Some(FormValue::Choices(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    None,
    Submitted(FormValues),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Form {
    title: String,
    fields: Vec<FormField>,
    focus: usize,
    error: Option<String>,
}

impl Form {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editing_text(&self) -> bool {
        self.focused().is_some_and(|field| field.kind.is_textual())
    }

    pub fn height(&self) -> u16 {
        crate::ui::layout::LayoutManager::form_height(self.fields.len())
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn values(&self) -> FormValues {
        FormValues {
            values: self.fields.iter().map(|field| (field.key, field.value())).collect(),
        }
    }

    /// Check required fields; focuses the first missing one on failure
    pub fn validate(&mut self) -> Result<FormValues, String> {
        if let Some(index) = self.fields.iter().position(FormField::is_missing) {
            self.focus = index;
            let message = format!("{} is required", self.fields[index].label);
            self.error = Some(message.clone());
            return Err(message);
        }
        self.error = None;
        Ok(self.values())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return FormEvent::None;
        }

        match key.code {
            KeyCode::Esc => FormEvent::Cancelled,
            KeyCode::Enter => match self.validate() {
                Ok(values) => FormEvent::Submitted(values),
                Err(_) => FormEvent::None,
            },
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormEvent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                FormEvent::None
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.handle_key(key);
                }
                FormEvent::None
            }
        }
    }

    pub fn shortcuts(&self) -> Vec<InstructionShortcut> {
        let mut hints = vec![shortcuts::TAB_NEXT, shortcuts::ENTER_SUBMIT];
        if self.focused().is_some_and(|field| !field.kind.is_textual()) {
            hints.push(shortcuts::SPACE_TOGGLE);
        }
        if self.focused().is_some_and(|field| field.help.is_some()) {
            hints.push(shortcuts::CTRL_T_TOOLTIP);
        }
        hints.push(shortcuts::ESC_CANCEL);
        hints
    }

    /// Draw the form inside a card. Fields with help text get a tooltip
    /// trigger on their top border, keyed by the field key.
    pub fn render(&self, f: &mut Frame, area: Rect, tooltips: &mut TooltipProvider) {
        let inner = CardSection::new().title(self.title.clone()).render(f, area);

        let mut constraints: Vec<Constraint> = self.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let chunks = Layout::vertical(constraints).split(inner);

        for (index, field) in self.fields.iter().enumerate() {
            let field_area = chunks[index];
            field.render(f, field_area, index == self.focus);

            if field.help.is_some() {
                let offset = field.label.chars().count() as u16 + if field.required { 7 } else { 5 };
                let trigger_area = Rect::new(
                    field_area.x.saturating_add(offset),
                    field_area.y,
                    field_area.width.saturating_sub(offset),
                    1,
                );
                TooltipTrigger::new(field.key).render(f, trigger_area, tooltips);
            }
        }

        let error_area = chunks[self.fields.len()];
        if let Some(error) = &self.error {
            f.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
                error_area,
            );
        }
        f.render_widget(create_instructions_paragraph(&self.shortcuts()), chunks[self.fields.len() + 1]);

        for field in &self.fields {
            if let Some(help) = &field.help {
                TooltipContent::new(help.clone()).render(f, tooltips, field.key);
            }
        }
    }
}
